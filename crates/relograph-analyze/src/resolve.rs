//! Resolve each model's relocation scope, silo membership, and dangling
//! status.

use relograph_core::error::ClassifyError;
use relograph_core::graph::{ForeignReference, ModelNode};
use relograph_core::registry::ModelRegistry;
use std::collections::BTreeSet;
use tracing::debug;

/// Resolve every registry model into a [`ModelNode`].
///
/// A model is dangling when no reference in the whole edge set targets it
/// and it is not designated a relocation root. Dangling models stay in the
/// output; rendering them at reduced opacity is the renderer's concern,
/// dropping them is the caller's.
pub fn resolve_models(
    registry: &ModelRegistry,
    edges: &[ForeignReference],
) -> Result<Vec<ModelNode>, ClassifyError> {
    let referenced: BTreeSet<&str> = edges.iter().map(|e| e.target.as_str()).collect();

    let mut nodes = Vec::with_capacity(registry.models.len());
    for model in &registry.models {
        let resolved_scope =
            model
                .scope
                .most_permissive()
                .ok_or_else(|| ClassifyError::MissingScope {
                    model: model.name.clone(),
                })?;

        let dangling = !model.relocation_root && !referenced.contains(model.name.as_str());
        if dangling {
            debug!(model = %model.name, "model is dangling");
        }

        nodes.push(ModelNode {
            name: model.name.clone(),
            scope: model.scope.clone(),
            resolved_scope,
            silos: model.silos.clone(),
            dangling,
        });
    }

    Ok(nodes)
}
