//! Lookup tables from id and alias to a position in the item list

use crate::model::Constituenta;
use concept_core::NodeId;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct CstIndex {
    by_id: HashMap<NodeId, usize>,
    by_alias: HashMap<String, usize>,
}

impl CstIndex {
    /// Index `items`. On a repeated id or alias the first occurrence wins.
    pub fn build(items: &[Constituenta]) -> Self {
        let mut index = CstIndex {
            by_id: HashMap::with_capacity(items.len()),
            by_alias: HashMap::with_capacity(items.len()),
        };
        for (position, cst) in items.iter().enumerate() {
            if index.by_id.contains_key(&cst.id) {
                tracing::warn!("Duplicate constituenta id {} ({})", cst.id, cst.alias);
            } else {
                index.by_id.insert(cst.id, position);
            }
            if index.by_alias.contains_key(&cst.alias) {
                tracing::warn!("Alias {} is used by more than one constituenta", cst.alias);
            } else {
                index.by_alias.insert(cst.alias.clone(), position);
            }
        }
        index
    }

    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn position_of_alias(&self, alias: &str) -> Option<usize> {
        self.by_alias.get(alias).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
