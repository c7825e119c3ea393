//! Topological ordering

use crate::graph::Graph;
use crate::model::NodeId;
use std::collections::HashSet;

enum Visit {
    Enter(NodeId),
    Finish(NodeId),
}

impl Graph {
    /// Linearize the graph so that every edge points forward.
    ///
    /// Iterative DFS, roots taken in insertion order, result is the reversed
    /// post-order. On a cyclic graph the walk still terminates but the order
    /// is meaningless; use [`Graph::find_cycle`] to check for cycles.
    pub fn topological_order(&self) -> Vec<NodeId> {
        let mut discovered: HashSet<NodeId> = HashSet::with_capacity(self.node_count());
        let mut finished: HashSet<NodeId> = HashSet::with_capacity(self.node_count());
        let mut result = Vec::with_capacity(self.node_count());
        let mut stack = Vec::new();

        for root in self.node_ids() {
            if discovered.contains(&root) {
                continue;
            }
            stack.push(Visit::Enter(root));
            while let Some(visit) = stack.pop() {
                match visit {
                    Visit::Enter(id) => {
                        if !discovered.insert(id) {
                            continue;
                        }
                        stack.push(Visit::Finish(id));
                        // Reversed so children are entered in adjacency order.
                        for &child in self.outputs_of(id).iter().rev() {
                            if !discovered.contains(&child) {
                                stack.push(Visit::Enter(child));
                            }
                        }
                    }
                    Visit::Finish(id) => {
                        if finished.insert(id) {
                            result.push(id);
                        }
                    }
                }
            }
        }

        result.reverse();
        result
    }
}
