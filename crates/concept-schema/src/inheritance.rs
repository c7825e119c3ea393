//! Inheritance annotation for schemas that take part in an operation graph

use crate::index::CstIndex;
use crate::model::{Constituenta, InheritanceInfo};
use indexmap::IndexMap;

/// Mark inherited constituents and the parents they were inherited from.
///
/// `parent_schema_index` numbers parent schemas from 1 in order of first
/// appearance among this schema's inheritance records.
pub fn annotate_inheritance(
    schema_id: u64,
    records: &[InheritanceInfo],
    items: &mut [Constituenta],
    index: &CstIndex,
) {
    let mut parent_schemas: IndexMap<u64, usize> = IndexMap::new();
    for record in records {
        if record.child_source == schema_id {
            let Some(position) = index.position(record.child) else {
                tracing::warn!("Inheritance record names unknown child {}", record.child);
                continue;
            };
            let next_index = parent_schemas.len() + 1;
            let schema_index = *parent_schemas.entry(record.parent_source).or_insert(next_index);
            let child = &mut items[position];
            child.is_inherited = true;
            child.parent_schema = Some(record.parent_source);
            child.parent_schema_index = Some(schema_index);
        } else if record.parent_source == schema_id {
            let Some(position) = index.position(record.parent) else {
                tracing::warn!("Inheritance record names unknown parent {}", record.parent);
                continue;
            };
            items[position].has_inherited_children = true;
        }
    }
}
