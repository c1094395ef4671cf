//! Classify every reference field in a registry snapshot.
//!
//! Classification is purely structural: a reference's kind and nullability
//! come from how the field is declared, never from runtime data. A field
//! whose target is Excluded from relocation still produces an edge.

use relograph_core::error::ClassifyError;
use relograph_core::graph::ForeignReference;
use relograph_core::registry::ModelRegistry;
use tracing::debug;

/// Turn every declared reference field into a [`ForeignReference`].
///
/// Edges come out in declaration order: models as the registry lists them,
/// fields as each model declares them. A field whose target is not in the
/// registry is a structural inconsistency and fails the whole pass.
pub fn classify_references(
    registry: &ModelRegistry,
) -> Result<Vec<ForeignReference>, ClassifyError> {
    let known = registry.model_names();
    let mut edges = Vec::new();

    for model in &registry.models {
        for field in &model.fields {
            if !known.contains(field.target.as_str()) {
                return Err(ClassifyError::UnknownReferenceTarget {
                    model: model.name.clone(),
                    field: field.name.clone(),
                    target: field.target.clone(),
                });
            }
            // A declaration silent on nullability classifies as nullable;
            // only an explicit `false` yields a non-nullable edge.
            edges.push(ForeignReference {
                source: model.name.clone(),
                field: field.name.clone(),
                target: field.target.clone(),
                kind: field.kind,
                nullable: field.nullable.unwrap_or(true),
            });
        }
        debug!(model = %model.name, fields = model.fields.len(), "classified references");
    }

    Ok(edges)
}
