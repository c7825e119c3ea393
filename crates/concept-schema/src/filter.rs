//! Display-graph filter for the term graph view

use crate::loader::LoadedSchema;
use crate::model::CstType;
use concept_core::{Graph, NodeId};
use serde::{Deserialize, Serialize};

/// What to strip from the dependency graph before showing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphFilterParams {
    pub transitive_reduction: bool,
    pub remove_isolated: bool,
    /// Fold every constituenta that has a spawner.
    pub fold_spawn: bool,
    pub hidden_types: Vec<CstType>,
}

impl Default for GraphFilterParams {
    fn default() -> Self {
        GraphFilterParams {
            transitive_reduction: true,
            remove_isolated: false,
            fold_spawn: false,
            hidden_types: Vec::new(),
        }
    }
}

pub struct TermGraphFilter {
    params: GraphFilterParams,
}

impl TermGraphFilter {
    pub fn new(params: GraphFilterParams) -> Self {
        TermGraphFilter { params }
    }

    /// Build the display graph. Hidden nodes are folded, so reachability
    /// between the remaining nodes is unchanged.
    pub fn apply(&self, schema: &LoadedSchema) -> Graph {
        let mut graph = schema.graph.clone();

        let hidden: Vec<NodeId> = schema
            .items
            .iter()
            .filter(|cst| {
                self.params.hidden_types.contains(&cst.cst_type)
                    || (self.params.fold_spawn && cst.spawner.is_some())
            })
            .map(|cst| cst.id)
            .collect();
        for id in &hidden {
            graph.fold_node(*id);
        }

        if self.params.remove_isolated {
            let removed = graph.remove_isolated();
            tracing::debug!("Removed {} isolated nodes", removed.len());
        }
        if self.params.transitive_reduction {
            graph.transitive_reduction();
        }

        tracing::debug!(
            "Display graph for {}: folded {}, {} nodes, {} edges",
            schema.alias,
            hidden.len(),
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }
}
