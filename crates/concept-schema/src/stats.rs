//! Aggregate counts over an annotated schema

use crate::model::{Constituenta, CstType, ParsingStatus, ValueClass};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaStats {
    pub count_all: usize,
    pub count_errors: usize,
    pub count_property: usize,
    pub count_incalculable: usize,
    pub count_inherited: usize,

    pub count_text_term: usize,
    pub count_definition: usize,
    pub count_convention: usize,

    pub count_base: usize,
    pub count_constant: usize,
    pub count_structured: usize,
    pub count_axiom: usize,
    pub count_term: usize,
    pub count_function: usize,
    pub count_predicate: usize,
    pub count_theorem: usize,
}

impl SchemaStats {
    pub fn calculate(items: &[Constituenta]) -> Self {
        let mut stats = SchemaStats {
            count_all: items.len(),
            ..Default::default()
        };
        for cst in items {
            if let Some(parse) = &cst.parse {
                match (parse.status, parse.value_class) {
                    (ParsingStatus::Incorrect, _) => stats.count_errors += 1,
                    (ParsingStatus::Verified, ValueClass::Invalid) => stats.count_incalculable += 1,
                    _ => {}
                }
                if parse.value_class == ValueClass::Property {
                    stats.count_property += 1;
                }
            }
            if cst.is_inherited {
                stats.count_inherited += 1;
            }
            if !cst.term_raw.is_empty() {
                stats.count_text_term += 1;
            }
            if !cst.definition_raw.is_empty() {
                stats.count_definition += 1;
            }
            if !cst.convention.is_empty() {
                stats.count_convention += 1;
            }
            let counter = match cst.cst_type {
                CstType::Base => &mut stats.count_base,
                CstType::Constant => &mut stats.count_constant,
                CstType::Structured => &mut stats.count_structured,
                CstType::Axiom => &mut stats.count_axiom,
                CstType::Term => &mut stats.count_term,
                CstType::Function => &mut stats.count_function,
                CstType::Predicate => &mut stats.count_predicate,
                CstType::Theorem => &mut stats.count_theorem,
            };
            *counter += 1;
        }
        stats
    }
}
