//! Compose resolved models and classified references into one dependency
//! graph.

use relograph_core::graph::{
    DependencyGraph, ForeignReference, GraphMetadata, ModelNode, ReferenceKind, RelocationScope,
    ScopeCluster,
};
use tracing::debug;

/// Build the dependency graph from resolved models and classified edges.
///
/// Construction is deterministic: members are name-sorted, clusters come
/// out in fixed scope order, and the edge list keeps classification order.
/// Identical input always yields identical cluster membership and edge
/// ordering.
///
/// Excluded-scope models are dropped unless `show_excluded` is set, in
/// which case they form their own trailing cluster. An edge whose source
/// survived filtering is kept even when its target did not; the rendering
/// step tolerates the unresolved endpoint to preserve full connectivity
/// information.
pub fn build_graph(
    mut models: Vec<ModelNode>,
    edges: Vec<ForeignReference>,
    show_excluded: bool,
) -> DependencyGraph {
    if !show_excluded {
        models.retain(|m| m.resolved_scope != RelocationScope::Excluded);
    }
    models.sort_by(|a, b| a.name.cmp(&b.name));

    let mut cluster_scopes: Vec<RelocationScope> = RelocationScope::CLUSTER_ORDER.to_vec();
    if show_excluded {
        cluster_scopes.push(RelocationScope::Excluded);
    }

    let clusters: Vec<ScopeCluster> = cluster_scopes
        .into_iter()
        .filter_map(|scope| {
            let members: Vec<ModelNode> = models
                .iter()
                .filter(|m| m.resolved_scope == scope)
                .cloned()
                .collect();
            if members.is_empty() {
                None
            } else {
                Some(ScopeCluster { scope, members })
            }
        })
        .collect();

    let surviving: std::collections::BTreeSet<&str> =
        models.iter().map(|m| m.name.as_str()).collect();
    let edges: Vec<ForeignReference> = edges
        .into_iter()
        .filter(|e| surviving.contains(e.source.as_str()))
        .collect();

    let metadata = GraphMetadata {
        total_models: models.len(),
        total_edges: edges.len(),
        explicit_edges: count_kind(&edges, ReferenceKind::Explicit),
        implicit_edges: count_kind(&edges, ReferenceKind::Implicit),
        hybrid_edges: count_kind(&edges, ReferenceKind::HybridCloud),
        dangling_models: models.iter().filter(|m| m.dangling).count(),
        excluded_shown: show_excluded,
    };
    debug!(
        models = metadata.total_models,
        edges = metadata.total_edges,
        clusters = clusters.len(),
        "built dependency graph"
    );

    DependencyGraph {
        metadata,
        clusters,
        edges,
    }
}

fn count_kind(edges: &[ForeignReference], kind: ReferenceKind) -> usize {
    edges.iter().filter(|e| e.kind == kind).count()
}
