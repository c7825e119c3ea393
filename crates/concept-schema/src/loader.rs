//! One-shot schema load: lookups, graph, inheritance, derivation, statistics

use crate::builder::DependencyGraphBuilder;
use crate::derivation::{DerivationEngine, DerivationForest};
use crate::error::SchemaError;
use crate::index::CstIndex;
use crate::inheritance::annotate_inheritance;
use crate::model::{Constituenta, SchemaData};
use crate::stats::SchemaStats;
use concept_core::{Graph, NodeId};
use std::path::Path;

/// A schema with its graph built and every derived attribute filled in.
///
/// Nothing here is updated incrementally; reloading means building a new one.
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    pub id: u64,
    pub alias: String,
    pub title: String,
    pub items: Vec<Constituenta>,
    pub graph: Graph,
    pub forest: DerivationForest,
    pub stats: SchemaStats,
    index: CstIndex,
}

impl LoadedSchema {
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let data: SchemaData = serde_json::from_str(json)?;
        Ok(SchemaLoader::new(data).load())
    }

    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let json = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn cst_by_id(&self, id: NodeId) -> Option<&Constituenta> {
        self.index.position(id).map(|position| &self.items[position])
    }

    pub fn cst_by_alias(&self, alias: &str) -> Option<&Constituenta> {
        self.index.position_of_alias(alias).map(|position| &self.items[position])
    }
}

pub struct SchemaLoader {
    data: SchemaData,
}

impl SchemaLoader {
    pub fn new(data: SchemaData) -> Self {
        SchemaLoader { data }
    }

    pub fn load(self) -> LoadedSchema {
        let SchemaData {
            id,
            alias,
            title,
            mut items,
            inheritance,
        } = self.data;

        for cst in &mut items {
            cst.reset_derived();
        }
        let index = CstIndex::build(&items);
        let graph = DependencyGraphBuilder::new().build(&items);
        annotate_inheritance(id, &inheritance, &mut items, &index);
        let forest = DerivationEngine::new(&graph, &index).run(&mut items);
        let stats = SchemaStats::calculate(&items);

        tracing::debug!(
            "Loaded schema {}: {} constituents, {} edges, {} spawned",
            alias,
            items.len(),
            graph.edge_count(),
            forest.len()
        );

        LoadedSchema {
            id,
            alias,
            title,
            items,
            graph,
            forest,
            stats,
            index,
        }
    }
}
