//! Core data structures for the dependency graph

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a graph node. Matches the id of the constituenta it stands for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        NodeId(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single node with both adjacency directions.
///
/// The adjacency lists are only reachable read-only from outside the crate;
/// every mutation goes through [`crate::Graph`] so that `b ∈ a.outputs`
/// holds exactly when `a ∈ b.inputs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: NodeId,
    outputs: Vec<NodeId>,
    inputs: Vec<NodeId>,
}

impl GraphNode {
    pub(crate) fn new(id: NodeId) -> Self {
        GraphNode {
            id,
            outputs: Vec::new(),
            inputs: Vec::new(),
        }
    }

    /// Nodes this node provides for, in edge insertion order.
    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    /// Nodes this node depends on, in edge insertion order.
    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    /// No edges in either direction.
    pub fn is_isolated(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }

    pub(crate) fn add_output(&mut self, target: NodeId) {
        if !self.outputs.contains(&target) {
            self.outputs.push(target);
        }
    }

    pub(crate) fn add_input(&mut self, source: NodeId) {
        if !self.inputs.contains(&source) {
            self.inputs.push(source);
        }
    }

    pub(crate) fn remove_output(&mut self, target: NodeId) -> bool {
        let before = self.outputs.len();
        self.outputs.retain(|&id| id != target);
        before != self.outputs.len()
    }

    pub(crate) fn remove_input(&mut self, source: NodeId) -> bool {
        let before = self.inputs.len();
        self.inputs.retain(|&id| id != source);
        before != self.inputs.len()
    }
}
