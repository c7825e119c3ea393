//! Constituenta records and their derived attributes

use concept_core::NodeId;
use serde::{Deserialize, Serialize};

/// Category of a constituenta. The alias prefix letter follows from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CstType {
    #[serde(rename = "basic", alias = "base")]
    Base,
    #[serde(rename = "constant")]
    Constant,
    #[serde(rename = "structure", alias = "structured")]
    Structured,
    #[serde(rename = "axiom")]
    Axiom,
    #[serde(rename = "term")]
    Term,
    #[serde(rename = "function")]
    Function,
    #[serde(rename = "predicate")]
    Predicate,
    #[serde(rename = "theorem")]
    Theorem,
}

impl CstType {
    /// Letter that starts every alias of this category (`X1`, `D12`, ...).
    pub fn prefix(self) -> char {
        match self {
            CstType::Base => 'X',
            CstType::Constant => 'C',
            CstType::Structured => 'S',
            CstType::Axiom => 'A',
            CstType::Term => 'D',
            CstType::Function => 'F',
            CstType::Predicate => 'P',
            CstType::Theorem => 'T',
        }
    }

    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'X' => Some(CstType::Base),
            'C' => Some(CstType::Constant),
            'S' => Some(CstType::Structured),
            'A' => Some(CstType::Axiom),
            'D' => Some(CstType::Term),
            'F' => Some(CstType::Function),
            'P' => Some(CstType::Predicate),
            'T' => Some(CstType::Theorem),
            _ => None,
        }
    }

    /// Base and constant sets: primitives that are not defined by an expression.
    pub fn is_base_set(self) -> bool {
        matches!(self, CstType::Base | CstType::Constant)
    }

    /// Functions and predicates take an argument-binding head.
    pub fn is_functional(self) -> bool {
        matches!(self, CstType::Function | CstType::Predicate)
    }
}

/// Coarse grouping used by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CstClass {
    #[default]
    Basic,
    Derived,
    Statement,
    Template,
}

impl CstClass {
    pub fn infer(cst_type: CstType, is_template: bool) -> Self {
        if is_template {
            return CstClass::Template;
        }
        match cst_type {
            CstType::Base | CstType::Constant | CstType::Structured => CstClass::Basic,
            CstType::Term | CstType::Function | CstType::Predicate => CstClass::Derived,
            CstType::Axiom | CstType::Theorem => CstClass::Statement,
        }
    }
}

/// Outcome of the external parser for one definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParsingStatus {
    #[default]
    #[serde(alias = "undefined")]
    Undetermined,
    Verified,
    Incorrect,
}

/// What kind of value the external type checker assigned to a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueClass {
    #[default]
    Value,
    Property,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentInfo {
    pub alias: String,
    pub typification: String,
}

/// Parser output, consumed as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ParseInfo {
    #[serde(default)]
    pub status: ParsingStatus,
    #[serde(default)]
    pub value_class: ValueClass,
    #[serde(default)]
    pub typification: String,
    #[serde(default)]
    pub args: Vec<ArgumentInfo>,
}

/// Display status combining parse status and value class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionStatus {
    #[default]
    Undefined,
    Unknown,
    Incorrect,
    Incalculable,
    Property,
    Verified,
}

impl ExpressionStatus {
    pub fn infer(parse: Option<&ParseInfo>) -> Self {
        let Some(parse) = parse else {
            return ExpressionStatus::Undefined;
        };
        match (parse.status, parse.value_class) {
            (ParsingStatus::Undetermined, _) => ExpressionStatus::Unknown,
            (ParsingStatus::Incorrect, _) => ExpressionStatus::Incorrect,
            (ParsingStatus::Verified, ValueClass::Invalid) => ExpressionStatus::Incalculable,
            (ParsingStatus::Verified, ValueClass::Property) => ExpressionStatus::Property,
            (ParsingStatus::Verified, ValueClass::Value) => ExpressionStatus::Verified,
        }
    }
}

/// A single definitional unit of a schema.
///
/// Everything below the `derived` marker is recomputed on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constituenta {
    pub id: NodeId,
    pub alias: String,
    pub cst_type: CstType,
    #[serde(default)]
    pub convention: String,
    #[serde(default)]
    pub term_raw: String,
    #[serde(default)]
    pub definition_formal: String,
    #[serde(default)]
    pub definition_raw: String,
    #[serde(default)]
    pub parse: Option<ParseInfo>,

    // ── derived ─────────────────────────────────────────────
    #[serde(default)]
    pub status: ExpressionStatus,
    #[serde(default)]
    pub cst_class: CstClass,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub is_simple_expression: bool,
    #[serde(default)]
    pub spawner: Option<NodeId>,
    #[serde(default)]
    pub spawner_alias: Option<String>,
    #[serde(default)]
    pub spawn: Vec<NodeId>,
    #[serde(default)]
    pub spawn_alias: Vec<String>,
    #[serde(default)]
    pub parent_schema: Option<u64>,
    #[serde(default)]
    pub parent_schema_index: Option<usize>,
    #[serde(default)]
    pub is_inherited: bool,
    #[serde(default)]
    pub has_inherited_children: bool,
}

impl Constituenta {
    pub fn new(id: u64, alias: impl Into<String>, cst_type: CstType) -> Self {
        Constituenta {
            id: NodeId(id),
            alias: alias.into(),
            cst_type,
            convention: String::new(),
            term_raw: String::new(),
            definition_formal: String::new(),
            definition_raw: String::new(),
            parse: None,
            status: ExpressionStatus::default(),
            cst_class: CstClass::default(),
            is_template: false,
            is_simple_expression: false,
            spawner: None,
            spawner_alias: None,
            spawn: Vec::new(),
            spawn_alias: Vec::new(),
            parent_schema: None,
            parent_schema_index: None,
            is_inherited: false,
            has_inherited_children: false,
        }
    }

    pub fn with_definition(mut self, definition_formal: impl Into<String>) -> Self {
        self.definition_formal = definition_formal.into();
        self
    }

    pub fn with_typification(mut self, typification: impl Into<String>) -> Self {
        self.parse.get_or_insert_with(ParseInfo::default).typification = typification.into();
        self
    }

    pub fn with_parse(mut self, parse: ParseInfo) -> Self {
        self.parse = Some(parse);
        self
    }

    /// Typification reported by the parser, empty if there is none.
    pub fn typification(&self) -> &str {
        self.parse.as_ref().map_or("", |parse| parse.typification.as_str())
    }

    /// Typifications of the declared arguments, in declaration order.
    pub fn argument_typifications(&self) -> impl Iterator<Item = &str> {
        self.parse
            .iter()
            .flat_map(|parse| parse.args.iter().map(|arg| arg.typification.as_str()))
    }

    pub(crate) fn reset_derived(&mut self) {
        self.status = ExpressionStatus::default();
        self.cst_class = CstClass::default();
        self.is_template = false;
        self.is_simple_expression = false;
        self.spawner = None;
        self.spawner_alias = None;
        self.spawn.clear();
        self.spawn_alias.clear();
        self.parent_schema = None;
        self.parent_schema_index = None;
        self.is_inherited = false;
        self.has_inherited_children = false;
    }
}

/// One inheritance edge of an operation graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InheritanceInfo {
    pub child: NodeId,
    pub parent: NodeId,
    pub child_source: u64,
    pub parent_source: u64,
}

/// Raw schema as delivered by the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaData {
    pub id: u64,
    pub alias: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<Constituenta>,
    #[serde(default)]
    pub inheritance: Vec<InheritanceInfo>,
}

impl SchemaData {
    pub fn new(id: u64, alias: impl Into<String>, items: Vec<Constituenta>) -> Self {
        SchemaData {
            id,
            alias: alias.into(),
            title: String::new(),
            items,
            inheritance: Vec::new(),
        }
    }
}
