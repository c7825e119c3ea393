//! Derivation inference: which constituents specialize a single parent

use crate::extractor::{extract_globals, is_simple_expression, is_template, split_template};
use crate::index::CstIndex;
use crate::model::{Constituenta, CstClass, CstType, ExpressionStatus};
use concept_core::{Graph, NodeId};
use indexmap::{IndexMap, IndexSet};

/// Spawner/spawn relation, kept beside the reference graph.
///
/// Every node has at most one parent, so the relation is a forest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivationForest {
    parents: IndexMap<NodeId, NodeId>,
    children: IndexMap<NodeId, Vec<NodeId>>,
}

impl DerivationForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// Topmost ancestor of `id`; `id` itself when it has no parent.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        // A forest never needs more steps than it has edges.
        for _ in 0..=self.parents.len() {
            match self.parents.get(&current) {
                Some(&parent) => current = parent,
                None => break,
            }
        }
        current
    }

    /// Number of nodes that have a parent.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// `(child, parent)` pairs in the order they were inferred.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.parents.iter().map(|(&child, &parent)| (child, parent))
    }

    fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.parents.insert(child, parent);
    }

    fn push_child(&mut self, parent: NodeId, child: NodeId) {
        self.children.entry(parent).or_default().push(child);
    }
}

/// Annotates constituents with template, class, status, simple-expression
/// and spawner attributes, in topological order of the dependency graph.
pub struct DerivationEngine<'a> {
    graph: &'a Graph,
    index: &'a CstIndex,
}

impl<'a> DerivationEngine<'a> {
    pub fn new(graph: &'a Graph, index: &'a CstIndex) -> Self {
        DerivationEngine { graph, index }
    }

    pub fn run(&self, items: &mut [Constituenta]) -> DerivationForest {
        let order = self.graph.topological_order();
        let mut forest = DerivationForest::new();

        for &id in &order {
            let Some(position) = self.index.position(id) else {
                continue;
            };
            let cst = &mut items[position];
            cst.status = ExpressionStatus::infer(cst.parse.as_ref());
            cst.is_template = is_template(&cst.definition_formal);
            cst.cst_class = CstClass::infer(cst.cst_type, cst.is_template);

            let simple = self.infer_simple_expression(items, position);
            items[position].is_simple_expression = simple;
            if !simple || items[position].cst_type == CstType::Structured {
                continue;
            }
            if let Some(parent) = self.infer_parent(items, &forest, position) {
                forest.set_parent(id, parent);
            }
        }

        for &id in &order {
            let Some(parent) = forest.parent(id) else {
                continue;
            };
            let (Some(child_pos), Some(parent_pos)) =
                (self.index.position(id), self.index.position(parent))
            else {
                continue;
            };
            forest.push_child(parent, id);
            let child_alias = items[child_pos].alias.clone();
            let parent_alias = items[parent_pos].alias.clone();
            items[child_pos].spawner = Some(parent);
            items[child_pos].spawner_alias = Some(parent_alias);
            items[parent_pos].spawn.push(id);
            items[parent_pos].spawn_alias.push(child_alias);
        }

        tracing::debug!("Inferred {} spawners over {} nodes", forest.len(), order.len());
        forest
    }

    fn get<'i>(&self, items: &'i [Constituenta], id: NodeId) -> Option<&'i Constituenta> {
        self.index.position(id).map(|position| &items[position])
    }

    fn get_by_alias<'i>(&self, items: &'i [Constituenta], alias: &str) -> Option<&'i Constituenta> {
        self.index.position_of_alias(alias).map(|position| &items[position])
    }

    fn inputs(&self, id: NodeId) -> &[NodeId] {
        self.graph.node(id).map(|node| node.inputs()).unwrap_or(&[])
    }

    fn infer_simple_expression(&self, items: &[Constituenta], position: usize) -> bool {
        let target = &items[position];
        if target.cst_type == CstType::Structured || target.cst_type.is_base_set() {
            return false;
        }
        let has_complex_dependency = self.inputs(target.id).iter().any(|&dep| {
            self.get(items, dep)
                .is_some_and(|cst| cst.is_template && !cst.is_simple_expression)
        });
        if has_complex_dependency {
            return false;
        }
        is_simple_expression(split_template(&target.definition_formal).body)
    }

    fn infer_parent(
        &self,
        items: &[Constituenta],
        forest: &DerivationForest,
        position: usize,
    ) -> Option<NodeId> {
        let target = &items[position];
        let sources = self.extract_sources(items, forest, position);
        if sources.len() != 1 {
            return None;
        }
        let parent_id = *sources.first()?;
        if parent_id == target.id {
            return None;
        }
        let parent = self.get(items, parent_id)?;
        if parent.cst_type.is_base_set() {
            return None;
        }
        Some(parent_id)
    }

    fn extract_sources(
        &self,
        items: &[Constituenta],
        forest: &DerivationForest,
        position: usize,
    ) -> IndexSet<NodeId> {
        let target = &items[position];
        let mut sources = IndexSet::new();

        if !target.cst_type.is_functional() {
            for &dep in self.inputs(target.id) {
                if self.get(items, dep).is_some_and(is_candidate) {
                    sources.insert(forest.root_of(dep));
                }
            }
            return sources;
        }

        let expression = split_template(&target.definition_formal);
        for alias in extract_globals(expression.body) {
            if let Some(parent) = self.get_by_alias(items, &alias).filter(|cst| is_candidate(cst)) {
                sources.insert(forest.root_of(parent.id));
            }
        }

        if self.needs_head_check(items, &sources, expression.head) {
            for alias in extract_globals(expression.head) {
                let Some(cst) = self.get_by_alias(items, &alias) else {
                    continue;
                };
                if !cst.cst_type.is_base_set() && is_candidate(cst) {
                    sources.insert(forest.root_of(cst.id));
                }
            }
        }
        sources
    }

    /// With a single body candidate the head only matters when it differs
    /// from the candidate's own head.
    fn needs_head_check(&self, items: &[Constituenta], sources: &IndexSet<NodeId>, head: &str) -> bool {
        if sources.len() != 1 {
            return true;
        }
        let Some(base) = sources.first().and_then(|&id| self.get(items, id)) else {
            return true;
        };
        !base.cst_type.is_functional() || split_template(&base.definition_formal).head != head
    }
}

/// Simple template instances are transparent: they never become a spawner.
fn is_candidate(cst: &Constituenta) -> bool {
    !cst.is_template || !cst.is_simple_expression
}
