//! Reachability expansion over the graph

use crate::graph::Graph;
use crate::model::NodeId;
use std::collections::HashSet;

#[derive(Clone, Copy)]
enum Direction {
    Outputs,
    Inputs,
}

impl Graph {
    fn neighbours(&self, id: NodeId, direction: Direction) -> &[NodeId] {
        match direction {
            Direction::Outputs => self.outputs_of(id),
            Direction::Inputs => self.inputs_of(id),
        }
    }

    fn expand(&self, origin: &[NodeId], direction: Direction) -> Vec<NodeId> {
        let members: HashSet<NodeId> = origin.iter().copied().collect();
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for &id in origin {
            for &next in self.neighbours(id, direction) {
                if !members.contains(&next) && seen.insert(next) {
                    result.push(next);
                }
            }
        }
        result
    }

    fn expand_all(&self, origin: &[NodeId], direction: Direction) -> Vec<NodeId> {
        let mut result = self.expand(origin, direction);
        if result.is_empty() {
            return result;
        }
        // Every id is enqueued at most once, so the worklist drains.
        let mut marked: HashSet<NodeId> = origin.iter().copied().collect();
        marked.extend(result.iter().copied());
        let mut position = 0;
        while position < result.len() {
            let current = result[position];
            for &next in self.neighbours(current, direction) {
                if marked.insert(next) {
                    result.push(next);
                }
            }
            position += 1;
        }
        result
    }

    /// One-hop successors of `origin`, excluding members of `origin`.
    pub fn expand_outputs(&self, origin: &[NodeId]) -> Vec<NodeId> {
        self.expand(origin, Direction::Outputs)
    }

    /// One-hop predecessors of `origin`, excluding members of `origin`.
    pub fn expand_inputs(&self, origin: &[NodeId]) -> Vec<NodeId> {
        self.expand(origin, Direction::Inputs)
    }

    /// Everything reachable from `origin` along outgoing edges, in discovery order.
    /// Members of `origin` are never part of the result.
    pub fn expand_all_outputs(&self, origin: &[NodeId]) -> Vec<NodeId> {
        self.expand_all(origin, Direction::Outputs)
    }

    /// Everything that reaches `origin` along incoming edges, in discovery order.
    /// Members of `origin` are never part of the result.
    pub fn expand_all_inputs(&self, origin: &[NodeId]) -> Vec<NodeId> {
        self.expand_all(origin, Direction::Inputs)
    }

    /// Grow `origin` by every dependent whose inputs all end up inside the result.
    ///
    /// Candidates are the transitive outputs of `origin`, visited in topological
    /// order so that a node is judged only after all of its predecessors.
    pub fn maximize_part(&self, origin: &[NodeId]) -> Vec<NodeId> {
        let outputs: HashSet<NodeId> = self.expand_all_outputs(origin).into_iter().collect();
        let mut result: Vec<NodeId> = origin.to_vec();
        let mut included: HashSet<NodeId> = origin.iter().copied().collect();
        for id in self.topological_order() {
            if !outputs.contains(&id) {
                continue;
            }
            if self.inputs_of(id).iter().all(|parent| included.contains(parent)) {
                included.insert(id);
                result.push(id);
            }
        }
        result
    }
}
