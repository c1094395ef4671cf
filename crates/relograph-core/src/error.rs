//! Typed errors for reference classification and scope resolution.

/// Structural inconsistencies found while classifying a registry snapshot.
///
/// These indicate a schema/metadata mismatch that must be fixed upstream;
/// they are never silently dropped or retried.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ClassifyError {
    /// A field claims to reference a model not present in the registry.
    #[error("field {model}.{field} references unknown model {target}")]
    UnknownReferenceTarget {
        model: String,
        field: String,
        target: String,
    },

    /// A model declared an empty scope candidate set; every model must
    /// resolve to at least one scope value.
    #[error("model {model} declares no relocation scope")]
    MissingScope { model: String },
}
