//! CLI command implementations

use crate::config::AnalysisConfig;
use anyhow::Context;
use concept_core::Graph;
use concept_schema::{CstType, LoadedSchema, SchemaStats, TermGraphFilter};
use concept_synthesis::{Substitution, SubstitutionValidator, ValidationReport};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Output of `concept analyze`
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub id: u64,
    pub alias: String,
    pub title: String,
    pub stats: SchemaStats,
    pub derivations: Vec<DerivationResponse>,
}

/// One spawner and the constituents derived from it
#[derive(Debug, Serialize)]
pub struct DerivationResponse {
    pub spawner: u64,
    pub alias: String,
    pub spawn: Vec<String>,
}

/// Output of `concept graph`
#[derive(Debug, Serialize)]
pub struct GraphResponse {
    pub nodes: Vec<NodeResponse>,
    pub edges: Vec<EdgeResponse>,
}

#[derive(Debug, Serialize)]
pub struct NodeResponse {
    pub id: u64,
    pub alias: String,
    pub cst_type: CstType,
    pub term: String,
}

#[derive(Debug, Serialize)]
pub struct EdgeResponse {
    pub source: u64,
    pub target: u64,
}

pub fn analyze(path: &Path) -> anyhow::Result<()> {
    let schema = load_schema(path)?;
    tracing::info!(
        "Loaded {} constituents, {} references",
        schema.items.len(),
        schema.graph.edge_count()
    );
    println!("{}", serde_json::to_string_pretty(&analysis_response(&schema))?);
    Ok(())
}

pub fn graph(path: &Path, config: &AnalysisConfig) -> anyhow::Result<()> {
    let schema = load_schema(path)?;
    let graph = TermGraphFilter::new(config.graph.clone()).apply(&schema);
    tracing::info!(
        "Display graph has {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    println!("{}", serde_json::to_string_pretty(&graph_response(&schema, &graph))?);
    Ok(())
}

/// Prints the report and returns whether the substitutions were accepted.
pub fn validate(schema_paths: &[PathBuf], substitutions_path: &Path) -> anyhow::Result<bool> {
    let schemas = schema_paths
        .iter()
        .map(|path| load_schema(path))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let substitutions = load_substitutions(substitutions_path)?;
    tracing::info!(
        "Checking {} substitutions across {} schemas",
        substitutions.len(),
        schemas.len()
    );

    let report = validation_report(&schemas, &substitutions);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report.is_valid)
}

fn load_schema(path: &Path) -> anyhow::Result<LoadedSchema> {
    LoadedSchema::from_path(path).with_context(|| format!("cannot load schema {}", path.display()))
}

fn load_substitutions(path: &Path) -> anyhow::Result<Vec<Substitution>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read substitutions {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("invalid substitutions {}", path.display()))
}

fn analysis_response(schema: &LoadedSchema) -> AnalysisResponse {
    let derivations = schema
        .items
        .iter()
        .filter(|cst| !cst.spawn.is_empty())
        .map(|cst| DerivationResponse {
            spawner: cst.id.0,
            alias: cst.alias.clone(),
            spawn: cst.spawn_alias.clone(),
        })
        .collect();

    AnalysisResponse {
        id: schema.id,
        alias: schema.alias.clone(),
        title: schema.title.clone(),
        stats: schema.stats,
        derivations,
    }
}

fn graph_response(schema: &LoadedSchema, graph: &Graph) -> GraphResponse {
    let nodes = graph
        .node_ids()
        .filter_map(|id| schema.cst_by_id(id))
        .map(|cst| NodeResponse {
            id: cst.id.0,
            alias: cst.alias.clone(),
            cst_type: cst.cst_type,
            term: cst.term_raw.clone(),
        })
        .collect();
    let edges = graph
        .all_edges()
        .map(|(source, target)| EdgeResponse {
            source: source.0,
            target: target.0,
        })
        .collect();
    GraphResponse { nodes, edges }
}

fn validation_report(schemas: &[LoadedSchema], substitutions: &[Substitution]) -> ValidationReport {
    SubstitutionValidator::new(schemas, substitutions).report()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCHEMA: &str = r#"{
        "id": 1,
        "alias": "KS1",
        "title": "Sets",
        "items": [
            {"id": 1, "alias": "X1", "cst_type": "basic", "definition_formal": ""},
            {"id": 2, "alias": "S1", "cst_type": "structure", "definition_formal": ""},
            {"id": 3, "alias": "D1", "cst_type": "term", "definition_formal": "Pr1(S1)"},
            {"id": 4, "alias": "D2", "cst_type": "term", "definition_formal": "D1\\X1"}
        ]
    }"#;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_analysis_lists_spawners() {
        let file = write_temp(SCHEMA);
        let schema = load_schema(file.path()).unwrap();
        let response = analysis_response(&schema);

        assert_eq!(response.alias, "KS1");
        assert_eq!(response.stats.count_all, 4);
        assert_eq!(response.derivations.len(), 1);
        assert_eq!(response.derivations[0].alias, "S1");
        assert_eq!(response.derivations[0].spawn, vec!["D1"]);
        assert_eq!(schema.forest.len(), 1);
    }

    #[test]
    fn test_graph_response_follows_filter() {
        let file = write_temp(SCHEMA);
        let schema = load_schema(file.path()).unwrap();

        let graph = TermGraphFilter::new(AnalysisConfig::default().graph).apply(&schema);
        let response = graph_response(&schema, &graph);
        assert_eq!(response.nodes.len(), 4);
        assert_eq!(response.nodes[0].alias, "X1");
        assert_eq!(response.edges.len(), graph.edge_count());
    }

    #[test]
    fn test_missing_schema_reports_path() {
        let err = load_schema(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/schema.json"));
    }

    #[test]
    fn test_substitutions_file() {
        let file = write_temp(r#"[{"original": 1, "substitution": 3}]"#);
        let substitutions = load_substitutions(file.path()).unwrap();
        assert_eq!(substitutions, vec![Substitution::new(1, 3)]);

        let schema_file = write_temp(SCHEMA);
        let schemas = vec![load_schema(schema_file.path()).unwrap()];
        // A term may stand in for a base set.
        assert!(validation_report(&schemas, &substitutions).is_valid);

        let rejected = [Substitution::new(3, 1)];
        let report = validation_report(&schemas, &rejected);
        assert!(!report.is_valid);
        assert!(report.message.contains("X1"));
    }
}
