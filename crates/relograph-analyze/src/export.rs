//! Render a dependency graph as a DOT (Graphviz) document.
//!
//! No computation happens here beyond string assembly; every decision was
//! made upstream by the classifier, resolver, and builder. Output is
//! stable text: the same graph always renders to the same bytes.

use relograph_core::graph::{DependencyGraph, ReferenceKind, RelocationScope, Silo};
use std::fmt::Write;

/// Fixed legend block, independent of graph data.
const LEGEND: &str = r##"  subgraph cluster_legend {
    label="Legend";
    fontsize=12;
    style=filled;
    fillcolor="#fafafa";
    "control silo" [fillcolor="#ffe0b2"];
    "region silo" [fillcolor="#b3e5fc"];
    "dangling model" [fillcolor="#b3e5fc66"];
    "explicit, non-nullable" [shape=plaintext, fillcolor="#fafafa"];
    "control silo" -> "explicit, non-nullable" [color="#000000", style=solid];
    "implicit, nullable" [shape=plaintext, fillcolor="#fafafa"];
    "region silo" -> "implicit, nullable" [color="#607d8b", style=dashed];
    "hybrid-cloud, nullable" [shape=plaintext, fillcolor="#fafafa"];
    "dangling model" -> "hybrid-cloud, nullable" [color="#d32f2f", style=dashed];
  }
"##;

const CLUSTER_LABEL_SUFFIX: &str = " Scope";

/// Alpha suffix appended to a node's fill color when the model is
/// dangling.
const DANGLING_ALPHA: &str = "66";

/// Cluster fill color per relocation scope.
fn scope_fill(scope: RelocationScope) -> &'static str {
    match scope {
        RelocationScope::User => "#fff3e0",
        RelocationScope::Organization => "#e3f2fd",
        RelocationScope::Config => "#e8f5e9",
        RelocationScope::Global => "#f3e5f5",
        RelocationScope::Excluded => "#eceff1",
    }
}

/// Node fill color per silo; models with no declared silo fall back to
/// white.
fn silo_fill(silo: Option<Silo>) -> &'static str {
    match silo {
        Some(Silo::Control) => "#ffe0b2",
        Some(Silo::Region) => "#b3e5fc",
        None => "#ffffff",
    }
}

/// Edge color per reference kind.
fn kind_color(kind: ReferenceKind) -> &'static str {
    match kind {
        ReferenceKind::Explicit => "#000000",
        ReferenceKind::Implicit => "#607d8b",
        ReferenceKind::HybridCloud => "#d32f2f",
    }
}

/// Edge line style per nullability.
fn nullable_style(nullable: bool) -> &'static str {
    if nullable { "dashed" } else { "solid" }
}

/// Render the graph as a DOT string.
pub fn render_dot(graph: &DependencyGraph) -> String {
    let mut out = String::new();
    writeln!(out, "digraph ModelRelocation {{").unwrap();
    writeln!(out, "  rankdir=LR;").unwrap();
    writeln!(out, "  node [shape=box, fontsize=10, style=filled];").unwrap();
    writeln!(out).unwrap();

    out.push_str(LEGEND);
    writeln!(out).unwrap();

    for cluster in &graph.clusters {
        writeln!(
            out,
            "  subgraph cluster_{} {{",
            cluster.scope.as_str().to_lowercase()
        )
        .unwrap();
        writeln!(
            out,
            "    label=\"{}{}\";",
            cluster.scope, CLUSTER_LABEL_SUFFIX
        )
        .unwrap();
        writeln!(out, "    style=filled;").unwrap();
        writeln!(out, "    fillcolor=\"{}\";", scope_fill(cluster.scope)).unwrap();
        for model in &cluster.members {
            let alpha = if model.dangling { DANGLING_ALPHA } else { "" };
            writeln!(
                out,
                "    \"{}\" [fillcolor=\"{}{}\"];",
                model.name,
                silo_fill(model.primary_silo()),
                alpha
            )
            .unwrap();
        }
        writeln!(out, "  }}").unwrap();
        writeln!(out).unwrap();
    }

    for edge in &graph.edges {
        writeln!(
            out,
            "  \"{}\" -> \"{}\" [color=\"{}\", style={}, tooltip=\"{}.{}\"];",
            edge.source,
            edge.target,
            kind_color(edge.kind),
            nullable_style(edge.nullable),
            edge.source,
            edge.field
        )
        .unwrap();
    }

    writeln!(out, "}}").unwrap();
    out
}
