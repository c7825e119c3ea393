//! Unit tests for concept-schema module

use crate::*;
use concept_core::NodeId;

fn cst(id: u64, alias: &str, cst_type: CstType, definition: &str) -> Constituenta {
    Constituenta::new(id, alias, cst_type).with_definition(definition)
}

fn parse(status: ParsingStatus, value_class: ValueClass) -> ParseInfo {
    ParseInfo {
        status,
        value_class,
        ..ParseInfo::default()
    }
}

/// A schema exercising every derivation outcome.
fn derivation_schema() -> SchemaData {
    let mut x1 = cst(1, "X1", CstType::Base, "")
        .with_parse(parse(ParsingStatus::Verified, ValueClass::Value));
    x1.term_raw = "element".to_string();
    x1.convention = "set of elements".to_string();

    let mut d1 = cst(3, "D1", CstType::Term, "Pr1(S1)");
    d1.term_raw = "first projection".to_string();
    d1.definition_raw = "projection of S1".to_string();

    let items = vec![
        x1,
        cst(2, "S1", CstType::Structured, "ℬ(X1×X1)"),
        d1,
        cst(4, "D2", CstType::Term, "D1∩Pr2(S1)"),
        cst(5, "D3", CstType::Term, "ℬ(X1)")
            .with_parse(parse(ParsingStatus::Incorrect, ValueClass::Invalid)),
        cst(6, "F1", CstType::Function, "[α∈ℬ(X1)] D1\\α"),
        cst(7, "D4", CstType::Term, "F1[D3]"),
        cst(8, "F2", CstType::Function, "[α∈R1] α∪α"),
        cst(9, "D5", CstType::Term, "F2[D1]"),
        cst(10, "F3", CstType::Function, "[α∈R1] ∀β∈α β∈α"),
        cst(11, "D6", CstType::Term, "F3[X1]")
            .with_parse(parse(ParsingStatus::Verified, ValueClass::Invalid)),
        cst(12, "D7", CstType::Term, "X1"),
        cst(13, "A1", CstType::Axiom, "D1=D2")
            .with_parse(parse(ParsingStatus::Verified, ValueClass::Property)),
    ];
    SchemaData::new(100, "KS1", items)
}

fn load(data: SchemaData) -> LoadedSchema {
    SchemaLoader::new(data).load()
}

fn spawner_of(schema: &LoadedSchema, alias: &str) -> Option<String> {
    schema.cst_by_alias(alias).and_then(|cst| cst.spawner_alias.clone())
}

#[test]
fn test_dependency_extraction_collapses_duplicates() {
    let items = vec![
        cst(1, "X1", CstType::Base, ""),
        cst(2, "X2", CstType::Base, ""),
        cst(10, "D1", CstType::Term, "X1 X2 X1"),
    ];
    let graph = DependencyGraphBuilder::new().build(&items);

    assert_eq!(graph.edge_count(), 2);
    assert!(graph.has_edge(NodeId(1), NodeId(10)));
    assert!(graph.has_edge(NodeId(2), NodeId(10)));
    assert_eq!(graph.node(NodeId(10)).unwrap().inputs(), &[NodeId(1), NodeId(2)]);
}

#[test]
fn test_unresolved_references_are_dropped() {
    let items = vec![
        cst(1, "X1", CstType::Base, ""),
        cst(2, "D1", CstType::Term, "X1∪X9∪D42"),
    ];
    let graph = DependencyGraphBuilder::new().build(&items);

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_builder_with_custom_extractor() {
    struct Words;
    impl ReferenceExtractor for Words {
        fn references(&self, text: &str) -> Vec<String> {
            text.split_whitespace().map(str::to_string).collect()
        }
    }

    let items = vec![
        cst(1, "alpha", CstType::Base, ""),
        cst(2, "beta", CstType::Term, "alpha gamma"),
    ];
    let graph = DependencyGraphBuilder::with_extractor(Words).build(&items);
    assert!(graph.has_edge(NodeId(1), NodeId(2)));
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_template_and_class_inference() {
    let schema = load(derivation_schema());

    let f2 = schema.cst_by_alias("F2").unwrap();
    assert!(f2.is_template);
    assert!(f2.is_simple_expression);
    assert_eq!(f2.cst_class, CstClass::Template);

    let f3 = schema.cst_by_alias("F3").unwrap();
    assert!(f3.is_template);
    assert!(!f3.is_simple_expression);

    assert_eq!(schema.cst_by_alias("X1").unwrap().cst_class, CstClass::Basic);
    assert_eq!(schema.cst_by_alias("D1").unwrap().cst_class, CstClass::Derived);
    assert_eq!(schema.cst_by_alias("A1").unwrap().cst_class, CstClass::Statement);
}

#[test]
fn test_simple_expression_inference() {
    let schema = load(derivation_schema());
    let simple = |alias: &str| schema.cst_by_alias(alias).unwrap().is_simple_expression;

    // Primitive and structured types are never simple
    assert!(!simple("X1"));
    assert!(!simple("S1"));
    assert!(simple("D1"));
    // Introduces a new structure
    assert!(!simple("D3"));
    // Depends on a template that is not simple
    assert!(!simple("D6"));
    assert!(simple("D5"));
}

#[test]
fn test_spawner_inference() {
    let schema = load(derivation_schema());

    assert_eq!(spawner_of(&schema, "D1").as_deref(), Some("S1"));
    // D2 references D1 and S1; D1 collapses into its own spawner
    assert_eq!(spawner_of(&schema, "D2").as_deref(), Some("S1"));
    // Functional: body candidate only, the head names a base set
    assert_eq!(spawner_of(&schema, "F1").as_deref(), Some("S1"));
    // Simple template instances are transparent
    assert_eq!(spawner_of(&schema, "D5").as_deref(), Some("S1"));
    // Two candidates: ambiguous
    assert_eq!(spawner_of(&schema, "D4"), None);
    // Base-set parents are never spawners
    assert_eq!(spawner_of(&schema, "D7"), None);
    assert_eq!(spawner_of(&schema, "F2"), None);
    assert_eq!(spawner_of(&schema, "S1"), None);
}

#[test]
fn test_spawn_lists_mirror_forest() {
    let schema = load(derivation_schema());
    let s1 = schema.cst_by_alias("S1").unwrap();

    let mut spawn_alias = s1.spawn_alias.clone();
    spawn_alias.sort();
    assert_eq!(spawn_alias, vec!["A1", "D1", "D2", "D5", "F1"]);
    assert_eq!(schema.forest.children(s1.id), s1.spawn.as_slice());
    assert_eq!(schema.forest.len(), 5);

    for (child, parent) in schema.forest.iter() {
        assert_eq!(schema.cst_by_id(child).unwrap().spawner, Some(parent));
        assert_eq!(schema.forest.root_of(child), parent);
    }
    // The forest lives beside the graph; the graph is untouched
    assert!(!schema.graph.has_edge(NodeId(2), NodeId(9)));
}

#[test]
fn test_functional_head_breaks_tie() {
    // F2's body references nothing; its head names D1, whose spawner is S1.
    let items = vec![
        cst(1, "X1", CstType::Base, ""),
        cst(2, "S1", CstType::Structured, "ℬ(X1)"),
        cst(3, "D1", CstType::Term, "Pr1(S1)"),
        cst(4, "F1", CstType::Function, "[α∈D1] α"),
    ];
    let schema = load(SchemaData::new(1, "KS", items));
    assert_eq!(spawner_of(&schema, "F1").as_deref(), Some("S1"));
}

#[test]
fn test_derived_fields_are_recomputed() {
    let mut data = derivation_schema();
    data.items[0].spawner = Some(NodeId(42));
    data.items[0].spawn = vec![NodeId(7)];
    data.items[0].is_inherited = true;

    let schema = load(data);
    let x1 = schema.cst_by_alias("X1").unwrap();
    assert_eq!(x1.spawner, None);
    assert!(x1.spawn.is_empty());
    assert!(!x1.is_inherited);
}

#[test]
fn test_inheritance_annotation() {
    let mut data = derivation_schema();
    data.id = 10;
    data.inheritance = vec![
        InheritanceInfo { child: NodeId(3), parent: NodeId(103), child_source: 10, parent_source: 20 },
        InheritanceInfo { child: NodeId(4), parent: NodeId(204), child_source: 10, parent_source: 30 },
        InheritanceInfo { child: NodeId(5), parent: NodeId(105), child_source: 10, parent_source: 20 },
        InheritanceInfo { child: NodeId(900), parent: NodeId(1), child_source: 40, parent_source: 10 },
        InheritanceInfo { child: NodeId(999), parent: NodeId(1), child_source: 10, parent_source: 20 },
    ];
    let schema = load(data);

    let d1 = schema.cst_by_id(NodeId(3)).unwrap();
    assert!(d1.is_inherited);
    assert_eq!(d1.parent_schema, Some(20));
    assert_eq!(d1.parent_schema_index, Some(1));

    let d2 = schema.cst_by_id(NodeId(4)).unwrap();
    assert_eq!(d2.parent_schema, Some(30));
    assert_eq!(d2.parent_schema_index, Some(2));

    assert_eq!(schema.cst_by_id(NodeId(5)).unwrap().parent_schema_index, Some(1));
    assert!(schema.cst_by_id(NodeId(1)).unwrap().has_inherited_children);
    assert_eq!(schema.stats.count_inherited, 3);
}

#[test]
fn test_expression_status() {
    let schema = load(derivation_schema());
    let status = |alias: &str| schema.cst_by_alias(alias).unwrap().status;

    assert_eq!(status("X1"), ExpressionStatus::Verified);
    assert_eq!(status("D3"), ExpressionStatus::Incorrect);
    assert_eq!(status("D6"), ExpressionStatus::Incalculable);
    assert_eq!(status("A1"), ExpressionStatus::Property);
    assert_eq!(status("D1"), ExpressionStatus::Undefined);
    assert_eq!(
        ExpressionStatus::infer(Some(&ParseInfo::default())),
        ExpressionStatus::Unknown
    );
}

#[test]
fn test_schema_stats() {
    let schema = load(derivation_schema());
    insta::assert_json_snapshot!(schema.stats, @r###"
    {
      "count_all": 13,
      "count_errors": 1,
      "count_property": 1,
      "count_incalculable": 1,
      "count_inherited": 0,
      "count_text_term": 2,
      "count_definition": 1,
      "count_convention": 1,
      "count_base": 1,
      "count_constant": 0,
      "count_structured": 1,
      "count_axiom": 1,
      "count_term": 7,
      "count_function": 3,
      "count_predicate": 0,
      "count_theorem": 0
    }
    "###);
}

#[test]
fn test_loaded_schema_from_json() {
    let json = r#"{
        "id": 5,
        "alias": "KS5",
        "items": [
            { "id": 1, "alias": "X1", "cst_type": "basic" },
            { "id": 2, "alias": "D1", "cst_type": "term", "definition_formal": "ℬ(X1)",
              "parse": { "status": "verified", "value_class": "value", "typification": "ℬ(X1)" } }
        ]
    }"#;
    let schema = LoadedSchema::from_json(json).unwrap();

    assert_eq!(schema.alias, "KS5");
    assert!(schema.graph.has_edge(NodeId(1), NodeId(2)));
    assert_eq!(schema.cst_by_alias("D1").unwrap().typification(), "ℬ(X1)");
    assert_eq!(schema.stats.count_all, 2);
}

#[test]
fn test_malformed_json_is_an_error() {
    let result = LoadedSchema::from_json(r#"{ "id": "not a number" }"#);
    assert!(matches!(result, Err(SchemaError::Json(_))));
}

#[test]
fn test_filter_hides_types_and_keeps_reachability() {
    let schema = load(derivation_schema());
    let params = GraphFilterParams {
        transitive_reduction: false,
        hidden_types: vec![CstType::Term],
        ..GraphFilterParams::default()
    };
    let graph = TermGraphFilter::new(params).apply(&schema);

    assert!(!graph.has_node(NodeId(3)));
    // S1 → D1 → A1 survives as S1 → A1
    assert!(graph.has_edge(NodeId(2), NodeId(13)));
    // X1 → D3 → D4 → (nothing visible); X1 → F1 stays
    assert!(graph.has_edge(NodeId(1), NodeId(6)));
}

#[test]
fn test_filter_folds_spawn_and_reduces() {
    let schema = load(derivation_schema());
    let params = GraphFilterParams {
        transitive_reduction: true,
        remove_isolated: true,
        fold_spawn: true,
        hidden_types: Vec::new(),
    };
    let graph = TermGraphFilter::new(params).apply(&schema);

    for alias in ["D1", "D2", "F1", "D5", "A1"] {
        let id = schema.cst_by_alias(alias).unwrap().id;
        assert!(!graph.has_node(id), "{} should be folded", alias);
    }
    // S1 → D1 → F1 → D4 collapses into S1 → D4
    assert!(graph.has_edge(NodeId(2), NodeId(7)));
    // X1 → D4 is implied by X1 → S1 → D4
    assert!(!graph.has_edge(NodeId(1), NodeId(7)));
    // F2 only fed D5, which was folded away
    assert!(!graph.has_node(NodeId(8)));
    // The schema graph itself is unchanged
    assert!(schema.graph.has_node(NodeId(3)));
}
