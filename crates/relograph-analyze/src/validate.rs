//! Structural validation of a registry snapshot.
//!
//! Unlike classification, which fails fast on the first inconsistency,
//! validation walks the whole snapshot and collects everything it finds,
//! so a broken registry can be fixed in one round.

use relograph_core::registry::ModelRegistry;
use serde::Serialize;
use std::collections::BTreeSet;

/// One structural problem found in the snapshot.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIssue {
    /// A field references a model not present in the registry.
    UnknownReferenceTarget {
        model: String,
        field: String,
        target: String,
    },
    /// A model declared an empty scope candidate set.
    MissingScope { model: String },
    /// Nothing references this model and it is not a relocation root.
    /// Informational: dangling models render at reduced opacity but are
    /// not an error.
    DanglingModel { model: String },
}

/// Complete validation report for a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub total_models: usize,
    pub total_reference_fields: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// True when no issue is an error (dangling models are informational).
    pub fn is_clean(&self) -> bool {
        self.issues
            .iter()
            .all(|i| matches!(i, ValidationIssue::DanglingModel { .. }))
    }
}

/// Walk the snapshot and collect every structural issue.
pub fn validate_registry(registry: &ModelRegistry) -> ValidationReport {
    let known = registry.model_names();
    let mut issues = Vec::new();
    let mut total_fields = 0;
    let mut referenced: BTreeSet<&str> = BTreeSet::new();

    for model in &registry.models {
        if model.scope.most_permissive().is_none() {
            issues.push(ValidationIssue::MissingScope {
                model: model.name.clone(),
            });
        }
        for field in &model.fields {
            total_fields += 1;
            if known.contains(field.target.as_str()) {
                referenced.insert(field.target.as_str());
            } else {
                issues.push(ValidationIssue::UnknownReferenceTarget {
                    model: model.name.clone(),
                    field: field.name.clone(),
                    target: field.target.clone(),
                });
            }
        }
    }

    for model in &registry.models {
        if !model.relocation_root && !referenced.contains(model.name.as_str()) {
            issues.push(ValidationIssue::DanglingModel {
                model: model.name.clone(),
            });
        }
    }

    ValidationReport {
        total_models: registry.models.len(),
        total_reference_fields: total_fields,
        issues,
    }
}
