//! End-to-end scenarios: registry snapshot → classification → resolution →
//! graph → DOT.

use relograph_analyze::build::build_graph;
use relograph_analyze::classify::classify_references;
use relograph_analyze::export::render_dot;
use relograph_analyze::resolve::resolve_models;
use relograph_core::graph::{DependencyGraph, ReferenceKind, RelocationScope};
use relograph_core::registry::ModelRegistry;

fn run_pipeline(json: &str, show_excluded: bool) -> DependencyGraph {
    let registry = ModelRegistry::from_json(json).unwrap();
    let edges = classify_references(&registry).unwrap();
    let models = resolve_models(&registry, &edges).unwrap();
    build_graph(models, edges, show_excluded)
}

#[test]
fn test_two_cluster_round_trip() {
    // A: Global, no references. B: User, one explicit non-nullable
    // reference to A.
    let json = r#"{
        "version": "1",
        "models": [
            {"name": "monitor.a", "scope": "global", "relocation_root": true},
            {"name": "monitor.b", "scope": "user", "relocation_root": true, "fields": [
                {"name": "a", "target": "monitor.a", "kind": "explicit", "nullable": false}
            ]}
        ]
    }"#;
    let graph = run_pipeline(json, false);

    assert_eq!(graph.clusters.len(), 2);
    assert_eq!(graph.clusters[0].scope, RelocationScope::User);
    assert_eq!(graph.clusters[0].members[0].name, "monitor.b");
    assert_eq!(graph.clusters[1].scope, RelocationScope::Global);
    assert_eq!(graph.clusters[1].members[0].name, "monitor.a");

    assert_eq!(graph.edges.len(), 1);
    let dot = render_dot(&graph);
    assert!(
        dot.contains("\"monitor.b\" -> \"monitor.a\" [color=\"#000000\", style=solid"),
        "explicit non-nullable edge must render solid in the explicit color:\n{dot}"
    );
}

#[test]
fn test_dangling_model_renders_reduced_opacity() {
    let json = r#"{
        "version": "1",
        "models": [
            {"name": "monitor.c", "scope": "organization"}
        ]
    }"#;
    let graph = run_pipeline(json, false);

    assert_eq!(graph.clusters.len(), 1);
    assert_eq!(graph.clusters[0].scope, RelocationScope::Organization);
    assert!(graph.clusters[0].members[0].dangling);
    assert!(graph.edges.is_empty(), "no edges touch a dangling model");

    let dot = render_dot(&graph);
    assert!(
        dot.contains("\"monitor.c\" [fillcolor=\"#b3e5fc66\"]"),
        "dangling models carry the alpha suffix:\n{dot}"
    );
}

#[test]
fn test_hybrid_nullable_reference_renders_dashed() {
    let json = r#"{
        "version": "1",
        "models": [
            {"name": "monitor.e", "scope": "config", "silos": ["control"], "relocation_root": true},
            {"name": "monitor.d", "scope": "organization", "silos": ["region"], "relocation_root": true, "fields": [
                {"name": "owner", "target": "monitor.e", "kind": "hybrid_cloud", "nullable": true}
            ]}
        ]
    }"#;
    let graph = run_pipeline(json, false);

    assert_eq!(graph.edges[0].kind, ReferenceKind::HybridCloud);
    let dot = render_dot(&graph);
    assert!(
        dot.contains("\"monitor.d\" -> \"monitor.e\" [color=\"#d32f2f\", style=dashed"),
        "hybrid nullable edge must render dashed in the hybrid color:\n{dot}"
    );
    // Silo decides node fill: control amber, region blue.
    assert!(dot.contains("\"monitor.e\" [fillcolor=\"#ffe0b2\"]"));
    assert!(dot.contains("\"monitor.d\" [fillcolor=\"#b3e5fc\"]"));
}

#[test]
fn test_show_excluded_partitions_exactly() {
    let json = r#"{
        "version": "1",
        "models": [
            {"name": "monitor.user", "scope": "user", "relocation_root": true},
            {"name": "monitor.org", "scope": "organization", "relocation_root": true},
            {"name": "monitor.option", "scope": "config", "relocation_root": true},
            {"name": "monitor.release", "scope": "global", "relocation_root": true},
            {"name": "monitor.nodestore", "scope": "excluded", "relocation_root": true}
        ]
    }"#;

    let hidden = run_pipeline(json, false);
    assert_eq!(hidden.metadata.total_models, 4);
    assert!(
        hidden
            .clusters
            .iter()
            .all(|c| c.scope != RelocationScope::Excluded)
    );

    let shown = run_pipeline(json, true);
    assert_eq!(shown.metadata.total_models, 5);
    assert_eq!(shown.clusters.len(), 5);
    let scopes: Vec<RelocationScope> = shown.clusters.iter().map(|c| c.scope).collect();
    assert_eq!(
        scopes,
        [
            RelocationScope::User,
            RelocationScope::Organization,
            RelocationScope::Config,
            RelocationScope::Global,
            RelocationScope::Excluded,
        ]
    );
}

#[test]
fn test_rendered_output_byte_identical() {
    let json = r#"{
        "version": "1",
        "models": [
            {"name": "monitor.org", "scope": "organization", "relocation_root": true},
            {"name": "monitor.team", "scope": "organization", "fields": [
                {"name": "org", "target": "monitor.org", "kind": "explicit", "nullable": false}
            ]},
            {"name": "monitor.project", "scope": "organization", "fields": [
                {"name": "org", "target": "monitor.org", "kind": "explicit", "nullable": false},
                {"name": "team", "target": "monitor.team", "kind": "implicit"}
            ]}
        ]
    }"#;
    let first = render_dot(&run_pipeline(json, false));
    let second = render_dot(&run_pipeline(json, false));
    assert_eq!(first, second, "same snapshot must render to the same bytes");
}

#[test]
fn test_legend_block_is_data_independent() {
    let empty = render_dot(&run_pipeline(r#"{"version": "1", "models": []}"#, false));
    assert!(empty.contains("subgraph cluster_legend"));
    assert!(empty.starts_with("digraph ModelRelocation {"));
    assert!(empty.trim_end().ends_with('}'));
}

#[test]
fn test_multi_scope_model_clusters_at_most_permissive() {
    let json = r#"{
        "version": "1",
        "models": [
            {"name": "monitor.dashboard", "scope": ["global", "organization"], "relocation_root": true}
        ]
    }"#;
    let graph = run_pipeline(json, false);
    assert_eq!(graph.clusters.len(), 1, "one cluster even with a scope set");
    assert_eq!(graph.clusters[0].scope, RelocationScope::Organization);
}
