//! Directed graph keyed by node id, with dual input/output adjacency

use crate::model::*;
use indexmap::IndexMap;

/// The dependency graph: an edge `a → b` means `b` references `a`.
///
/// Nodes iterate in insertion order, which makes every traversal (and the
/// first cycle reported) deterministic for a deterministic input. Adding an
/// edge that already exists is a no-op.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: IndexMap<NodeId, GraphNode>,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.node_count())
            .field("edge_count", &self.edge_count())
            .finish()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            nodes: IndexMap::new(),
        }
    }

    /// Build a graph from an edge list. Endpoints are created in order of appearance.
    pub fn from_edges<I, N>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
        N: Into<NodeId>,
    {
        let mut graph = Graph::new();
        for (source, target) in edges {
            graph.add_edge(source.into(), target.into());
        }
        graph
    }

    /// Return the node for `id`, creating it if it does not exist yet.
    pub fn add_node(&mut self, id: NodeId) -> &GraphNode {
        self.nodes.entry(id).or_insert_with(|| GraphNode::new(id))
    }

    /// Add the edge `source → target`, creating missing endpoints.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) {
        self.nodes
            .entry(source)
            .or_insert_with(|| GraphNode::new(source))
            .add_output(target);
        self.nodes
            .entry(target)
            .or_insert_with(|| GraphNode::new(target))
            .add_input(source);
    }

    /// Remove the edge `source → target`. Both endpoints stay in the graph.
    pub fn remove_edge(&mut self, source: NodeId, target: NodeId) -> bool {
        let removed = match self.nodes.get_mut(&source) {
            Some(node) => node.remove_output(target),
            None => false,
        };
        if let Some(node) = self.nodes.get_mut(&target) {
            node.remove_input(source);
        }
        removed
    }

    /// Detach a node from all of its neighbours, then delete it.
    pub fn remove_node(&mut self, id: NodeId) -> Option<GraphNode> {
        let node = self.nodes.shift_remove(&id)?;
        for input in node.inputs() {
            if let Some(parent) = self.nodes.get_mut(input) {
                parent.remove_output(id);
            }
        }
        for output in node.outputs() {
            if let Some(child) = self.nodes.get_mut(output) {
                child.remove_input(id);
            }
        }
        Some(node)
    }

    /// Delete every node without edges and return their ids.
    pub fn remove_isolated(&mut self) -> Vec<NodeId> {
        let isolated: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|node| node.is_isolated())
            .map(|node| node.id)
            .collect();
        self.nodes.retain(|_, node| !node.is_isolated());
        isolated
    }

    /// Remove a node while keeping reachability through it: every input gets
    /// wired directly to every output before the node is deleted.
    pub fn fold_node(&mut self, id: NodeId) -> Option<GraphNode> {
        let node = self.nodes.get(&id)?;
        let inputs: Vec<NodeId> = node.inputs().iter().copied().filter(|&n| n != id).collect();
        let outputs: Vec<NodeId> = node.outputs().iter().copied().filter(|&n| n != id).collect();
        for &input in &inputs {
            for &output in &outputs {
                self.add_edge(input, output);
            }
        }
        self.remove_node(id)
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn has_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.nodes
            .get(&source)
            .is_some_and(|node| node.outputs().contains(&target))
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.outputs().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Iterate over all nodes in insertion order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// Every edge as a `(source, target)` pair, grouped by source.
    pub fn all_edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes
            .values()
            .flat_map(|node| node.outputs().iter().map(move |&target| (node.id, target)))
    }

    pub(crate) fn outputs_of(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|node| node.outputs()).unwrap_or(&[])
    }

    pub(crate) fn inputs_of(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|node| node.inputs()).unwrap_or(&[])
    }
}
