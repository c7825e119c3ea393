//! Conversion into petgraph for consumers that want its algorithms

use crate::graph::Graph;
use crate::model::NodeId;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use std::collections::HashMap;

/// A petgraph copy of a [`Graph`] plus the id → index lookup.
pub struct PetgraphView {
    pub graph: StableDiGraph<NodeId, ()>,
    pub index: HashMap<NodeId, NodeIndex>,
}

impl PetgraphView {
    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    /// `true` if `target` is reachable from `source` (a node reaches itself).
    pub fn has_path(&self, source: NodeId, target: NodeId) -> bool {
        match (self.index_of(source), self.index_of(target)) {
            (Some(from), Some(to)) => {
                petgraph::algo::has_path_connecting(&self.graph, from, to, None)
            }
            _ => false,
        }
    }
}

impl Graph {
    /// Copy nodes (in insertion order) and edges into a `StableDiGraph`.
    pub fn to_stable_graph(&self) -> PetgraphView {
        let mut graph = StableDiGraph::with_capacity(self.node_count(), self.edge_count());
        let mut index = HashMap::with_capacity(self.node_count());
        for id in self.node_ids() {
            index.insert(id, graph.add_node(id));
        }
        for (source, target) in self.all_edges() {
            graph.add_edge(index[&source], index[&target], ());
        }
        PetgraphView { graph, index }
    }
}
