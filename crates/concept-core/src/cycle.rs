//! Cycle detection

use crate::graph::Graph;
use crate::model::NodeId;
use std::collections::{HashMap, HashSet};

impl Graph {
    /// Find one directed cycle, if any.
    ///
    /// Roots are taken in insertion order and children in adjacency order, so
    /// the reported cycle is the first one met by that walk. The path is
    /// closed: it starts and ends with the same node and every consecutive
    /// pair is an edge of the graph.
    pub fn find_cycle(&self) -> Option<Vec<NodeId>> {
        let mut visited: HashSet<NodeId> = HashSet::with_capacity(self.node_count());
        let mut on_stack: HashSet<NodeId> = HashSet::new();
        let mut parents: HashMap<NodeId, NodeId> = HashMap::new();

        for root in self.node_ids() {
            if visited.contains(&root) {
                continue;
            }
            visited.insert(root);
            on_stack.insert(root);
            // Each frame holds a node and the index of its next child to examine.
            let mut frames: Vec<(NodeId, usize)> = vec![(root, 0)];

            while let Some(frame) = frames.last_mut() {
                let (current, next) = *frame;
                let outputs = self.outputs_of(current);
                if next >= outputs.len() {
                    on_stack.remove(&current);
                    frames.pop();
                    continue;
                }
                frame.1 += 1;

                let child = outputs[next];
                if on_stack.contains(&child) {
                    return Some(close_cycle(&parents, current, child));
                }
                if visited.insert(child) {
                    on_stack.insert(child);
                    parents.insert(child, current);
                    frames.push((child, 0));
                }
            }
        }

        None
    }
}

/// Walk parent pointers from `current` back to `target` and close the path.
fn close_cycle(parents: &HashMap<NodeId, NodeId>, current: NodeId, target: NodeId) -> Vec<NodeId> {
    let mut path = vec![target];
    let mut cursor = current;
    while cursor != target {
        path.push(cursor);
        match parents.get(&cursor) {
            Some(&parent) => cursor = parent,
            None => break,
        }
    }
    path.push(target);
    // path is [target, current, ..., target] walking backwards along edges.
    path.reverse();
    path
}
