//! Integration tests for Concept
//!
//! These tests drive the built binary against schema files on disk.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const KS1: &str = r#"{
    "id": 1,
    "alias": "KS1",
    "title": "Sets",
    "items": [
        {"id": 1, "alias": "X1", "cst_type": "basic",
         "parse": {"status": "verified", "value_class": "value", "typification": "ℬ(X1)"}},
        {"id": 2, "alias": "S1", "cst_type": "structure", "definition_formal": "ℬ(X1×X1)"},
        {"id": 3, "alias": "D1", "cst_type": "term", "definition_formal": "Pr1(S1)",
         "parse": {"status": "verified", "value_class": "value", "typification": "ℬ(X1)"}},
        {"id": 4, "alias": "D2", "cst_type": "term", "definition_formal": "D1\\X1"},
        {"id": 5, "alias": "A1", "cst_type": "axiom", "definition_formal": "D1=D2",
         "parse": {"status": "incorrect"}}
    ]
}"#;

const KS2: &str = r#"{
    "id": 2,
    "alias": "KS2",
    "items": [
        {"id": 11, "alias": "X1", "cst_type": "basic",
         "parse": {"status": "verified", "typification": "ℬ(X1)"}},
        {"id": 12, "alias": "D1", "cst_type": "term", "definition_formal": "X1",
         "parse": {"status": "verified", "typification": "ℬ(X1)"}}
    ]
}"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn concept(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_concept"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to execute concept")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_cli_invocation() {
    let dir = TempDir::new().unwrap();
    let output = concept(&["--help"], dir.path());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dependency analysis for conceptual schemas"));

    let output = concept(&["version"], dir.path());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Concept v"));
}

#[test]
fn test_analyze_prints_stats_and_derivations() {
    let dir = TempDir::new().unwrap();
    let schema = write(&dir, "ks1.json", KS1);

    let output = concept(&["analyze", schema.to_str().unwrap()], dir.path());
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["alias"], "KS1");
    assert_eq!(json["stats"]["count_all"], 5);
    assert_eq!(json["stats"]["count_errors"], 1);
    assert_eq!(json["derivations"][0]["alias"], "S1");
    assert_eq!(json["derivations"][0]["spawn"][0], "D1");
}

#[test]
fn test_analyze_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = concept(&["analyze", "missing.json"], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.json"));
}

#[test]
fn test_graph_default_config_reduces_edges() {
    let dir = TempDir::new().unwrap();
    let schema = write(&dir, "ks1.json", KS1);

    let output = concept(&["graph", schema.to_str().unwrap()], dir.path());
    assert!(output.status.success());
    let json = stdout_json(&output);
    let edges = json["edges"].as_array().unwrap();

    // D1 → A1 is implied by D1 → D2 → A1.
    assert!(!edges.iter().any(|e| e["source"] == 3 && e["target"] == 5));
    assert!(edges.iter().any(|e| e["source"] == 3 && e["target"] == 4));
    assert_eq!(json["nodes"].as_array().unwrap().len(), 5);
}

#[test]
fn test_graph_reads_config_file() {
    let dir = TempDir::new().unwrap();
    let schema = write(&dir, "ks1.json", KS1);
    write(
        &dir,
        "concept.toml",
        "[graph]\ntransitive_reduction = false\nhidden_types = [\"axiom\"]\n",
    );

    let output = concept(&["graph", schema.to_str().unwrap()], dir.path());
    assert!(output.status.success());
    let json = stdout_json(&output);

    let nodes = json["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 4);
    assert!(nodes.iter().all(|n| n["cst_type"] != "axiom"));
    let edges = json["edges"].as_array().unwrap();
    assert!(edges.iter().any(|e| e["source"] == 1 && e["target"] == 4));
}

#[test]
fn test_graph_rejects_bad_config() {
    let dir = TempDir::new().unwrap();
    let schema = write(&dir, "ks1.json", KS1);
    let config = write(&dir, "custom.toml", "[graph]\nfold_spawn = \"yes\"\n");

    let output = concept(
        &["--config", config.to_str().unwrap(), "graph", schema.to_str().unwrap()],
        dir.path(),
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("custom.toml"));
}

#[test]
fn test_validate_accepts_compatible_substitutions() {
    let dir = TempDir::new().unwrap();
    let ks1 = write(&dir, "ks1.json", KS1);
    let ks2 = write(&dir, "ks2.json", KS2);
    let subs = write(&dir, "subs.json", r#"[{"original": 11, "substitution": 1}]"#);

    let output = concept(
        &["validate", ks1.to_str().unwrap(), ks2.to_str().unwrap(), "--substitutions", subs.to_str().unwrap()],
        dir.path(),
    );
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["is_valid"], true);
}

#[test]
fn test_validate_rejects_typification_cycle() {
    let dir = TempDir::new().unwrap();
    let ks1 = write(&dir, "ks1.json", KS1);
    let ks2 = write(&dir, "ks2.json", KS2);
    // KS2.D1 is typed by KS2.X1, which would itself be replaced through KS1.X1.
    let subs = write(
        &dir,
        "subs.json",
        r#"[{"original": 1, "substitution": 12}, {"original": 11, "substitution": 1}]"#,
    );

    let output = concept(
        &["validate", ks1.to_str().unwrap(), ks2.to_str().unwrap(), "--substitutions", subs.to_str().unwrap()],
        dir.path(),
    );
    assert!(!output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["is_valid"], false);
    assert_eq!(
        json["message"],
        "circular type dependency: [KS1]-X1, [KS2]-X1, [KS2]-D1, [KS1]-X1"
    );
}
