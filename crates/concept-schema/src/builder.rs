//! Dependency graph construction from raw definitions

use crate::extractor::{GlobalIdentifiers, ReferenceExtractor};
use crate::model::Constituenta;
use concept_core::{Graph, NodeId};
use std::collections::HashMap;

/// Turns definitions into edges `referenced → referencing`.
pub struct DependencyGraphBuilder<E = GlobalIdentifiers> {
    extractor: E,
}

impl DependencyGraphBuilder<GlobalIdentifiers> {
    pub fn new() -> Self {
        DependencyGraphBuilder {
            extractor: GlobalIdentifiers,
        }
    }
}

impl Default for DependencyGraphBuilder<GlobalIdentifiers> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ReferenceExtractor> DependencyGraphBuilder<E> {
    pub fn with_extractor(extractor: E) -> Self {
        DependencyGraphBuilder { extractor }
    }

    /// Build the graph. Every constituenta becomes a node, in input order;
    /// references to unknown aliases produce no edge.
    pub fn build(&self, items: &[Constituenta]) -> Graph {
        let mut graph = Graph::new();
        let mut by_alias: HashMap<&str, NodeId> = HashMap::with_capacity(items.len());
        for cst in items {
            graph.add_node(cst.id);
            by_alias.entry(cst.alias.as_str()).or_insert(cst.id);
        }

        let mut unresolved = 0usize;
        for cst in items {
            for alias in self.extractor.references(&cst.definition_formal) {
                match by_alias.get(alias.as_str()) {
                    Some(&source) => graph.add_edge(source, cst.id),
                    None => unresolved += 1,
                }
            }
        }

        tracing::debug!(
            "Built dependency graph: {} nodes, {} edges, {} unresolved references",
            graph.node_count(),
            graph.edge_count(),
            unresolved
        );
        graph
    }
}
