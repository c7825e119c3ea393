//! Type-compatibility and typification-cycle checks for substitutions

use crate::error::SubstitutionError;
use concept_core::{Graph, NodeId};
use concept_schema::{extract_globals, Constituenta, CstType, LoadedSchema};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `original` is replaced by `substitution` in the synthesized schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Substitution {
    pub original: NodeId,
    pub substitution: NodeId,
}

impl Substitution {
    pub fn new(original: u64, substitution: u64) -> Self {
        Substitution {
            original: NodeId(original),
            substitution: NodeId(substitution),
        }
    }
}

/// Verdict plus a single diagnostic line; the line is empty when valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub message: String,
}

struct Entry<'a> {
    cst: &'a Constituenta,
    schema: &'a LoadedSchema,
}

/// Checks a proposed set of substitutions across several schemas.
///
/// Constituenta ids are unique across all participating schemas.
pub struct SubstitutionValidator<'a> {
    schemas: &'a [LoadedSchema],
    substitutions: &'a [Substitution],
    cst_by_id: HashMap<NodeId, Entry<'a>>,
}

impl<'a> SubstitutionValidator<'a> {
    pub fn new(schemas: &'a [LoadedSchema], substitutions: &'a [Substitution]) -> Self {
        let mut cst_by_id = HashMap::new();
        for schema in schemas {
            for cst in &schema.items {
                cst_by_id.entry(cst.id).or_insert(Entry { cst, schema });
            }
        }
        SubstitutionValidator {
            schemas,
            substitutions,
            cst_by_id,
        }
    }

    /// Run the type check, then the cycle check. Stops at the first violation.
    pub fn validate(&self) -> Result<(), SubstitutionError> {
        if self.substitutions.is_empty() {
            return Ok(());
        }
        self.check_types()?;
        self.check_cycles()?;
        tracing::debug!("Accepted {} substitutions", self.substitutions.len());
        Ok(())
    }

    pub fn report(&self) -> ValidationReport {
        match self.validate() {
            Ok(()) => ValidationReport {
                is_valid: true,
                message: String::new(),
            },
            Err(e) => {
                tracing::info!("Substitutions rejected: {}", e);
                ValidationReport {
                    is_valid: false,
                    message: e.to_string(),
                }
            }
        }
    }

    fn check_types(&self) -> Result<(), SubstitutionError> {
        for pair in self.substitutions {
            let (Some(original), Some(substitution)) = (
                self.cst_by_id.get(&pair.original),
                self.cst_by_id.get(&pair.substitution),
            ) else {
                return Err(SubstitutionError::InvalidIds {
                    original: pair.original,
                    substitution: pair.substitution,
                });
            };
            check_pair(original.cst, substitution.cst)?;
        }
        Ok(())
    }

    fn check_cycles(&self) -> Result<(), SubstitutionError> {
        let graph = self.type_dependency_graph();
        let Some(cycle) = graph.find_cycle() else {
            return Ok(());
        };
        let chain = cycle
            .iter()
            .filter_map(|id| self.cst_by_id.get(id))
            .map(|entry| format!("[{}]-{}", entry.schema.alias, entry.cst.alias))
            .collect::<Vec<_>>()
            .join(", ");
        Err(SubstitutionError::TypificationCycle { chain })
    }

    /// Nodes are type-bearing constituents; `a → b` means `b`'s typification
    /// mentions `a`, or `a` is substituted for `b`.
    fn type_dependency_graph(&self) -> Graph {
        let mut graph = Graph::new();
        for schema in self.schemas {
            for cst in schema.items.iter().filter(|cst| cst.cst_type.is_base_set()) {
                graph.add_node(cst.id);
            }
        }
        for schema in self.schemas {
            for cst in &schema.items {
                for alias in type_references(cst) {
                    let Some(dependency) = schema.cst_by_alias(&alias) else {
                        continue;
                    };
                    // A base set is typed by its own power set.
                    if dependency.id != cst.id {
                        graph.add_edge(dependency.id, cst.id);
                    }
                }
            }
        }
        for pair in self.substitutions {
            graph.add_edge(pair.substitution, pair.original);
        }
        graph
    }
}

/// Identifiers mentioned in a constituenta's typification and argument typifications.
fn type_references(cst: &Constituenta) -> IndexSet<String> {
    let mut aliases: IndexSet<String> = extract_globals(cst.typification()).into_iter().collect();
    for typification in cst.argument_typifications() {
        aliases.extend(extract_globals(typification));
    }
    aliases
}

/// Which originals a substitution of a given category may replace.
fn check_pair(original: &Constituenta, substitution: &Constituenta) -> Result<(), SubstitutionError> {
    use CstType::*;
    let allowed = match substitution.cst_type {
        Base => matches!(original.cst_type, Base | Constant),
        Constant => original.cst_type == Constant,
        Axiom | Theorem => matches!(original.cst_type, Axiom | Theorem),
        Function => original.cst_type == Function,
        Predicate => original.cst_type == Predicate,
        Term | Structured => matches!(original.cst_type, Term | Structured | Base),
    };
    if allowed {
        return Ok(());
    }
    let substitution_alias = substitution.alias.clone();
    let original_alias = original.alias.clone();
    Err(match substitution.cst_type {
        Base => SubstitutionError::InvalidBasic {
            substitution: substitution_alias,
            original: original_alias,
        },
        Constant => SubstitutionError::InvalidConstant {
            substitution: substitution_alias,
            original: original_alias,
        },
        _ => SubstitutionError::InvalidClasses {
            substitution: substitution_alias,
            original: original_alias,
        },
    })
}
