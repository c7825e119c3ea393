//! Transitive reduction

use crate::graph::Graph;
use crate::model::NodeId;
use std::collections::{HashSet, VecDeque};

impl Graph {
    /// Remove every edge implied by a longer path, in place.
    ///
    /// The graph must be acyclic. Cycles are not checked for here; callers
    /// that cannot guarantee acyclicity run [`Graph::find_cycle`] first.
    pub fn transitive_reduction(&mut self) {
        let order = self.topological_order();
        let mut removed = 0usize;
        for origin in order {
            let implied = self.reachable_beyond_successors(origin);
            for target in implied {
                if self.remove_edge(origin, target) {
                    removed += 1;
                }
            }
        }
        tracing::debug!("Transitive reduction removed {} edges", removed);
    }

    /// Nodes reachable from `origin` through at least two edges.
    fn reachable_beyond_successors(&self, origin: NodeId) -> Vec<NodeId> {
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut reached = Vec::new();
        let mut queue: VecDeque<NodeId> = VecDeque::new();
        for &successor in self.outputs_of(origin) {
            for &next in self.outputs_of(successor) {
                if visited.insert(next) {
                    reached.push(next);
                    queue.push_back(next);
                }
            }
        }
        while let Some(current) = queue.pop_front() {
            for &next in self.outputs_of(current) {
                if visited.insert(next) {
                    reached.push(next);
                    queue.push_back(next);
                }
            }
        }
        reached
    }
}
