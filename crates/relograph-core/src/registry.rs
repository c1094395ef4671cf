//! Load and validate model-registry snapshots.
//!
//! The snapshot is the one interface this tool consumes from the host
//! framework: a JSON export of every persisted model, its declared
//! relocation scope, silo membership, and reference fields. A snapshot
//! that cannot be loaded is a fatal startup error with no partial output.

use crate::graph::{ReferenceKind, ScopeSpec, Silo};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const SNAPSHOT_VERSION: &str = "1";

/// One reference field as declared in the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    /// Name of the referenced model.
    pub target: String,
    pub kind: ReferenceKind,
    /// `None` when the declaration is silent on nullability. The
    /// classifier treats that as nullable; only an explicit `false`
    /// yields a non-nullable edge.
    #[serde(default)]
    pub nullable: Option<bool>,
}

/// One persisted model as declared in the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    pub scope: ScopeSpec,
    #[serde(default = "default_silos")]
    pub silos: Vec<Silo>,
    /// Relocation roots are entry points of an export; they are not
    /// dangling even when nothing references them.
    #[serde(default)]
    pub relocation_root: bool,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

fn default_silos() -> Vec<Silo> {
    vec![Silo::Region]
}

/// A versioned registry snapshot: every persisted model in declaration
/// order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRegistry {
    pub version: String,
    pub models: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    /// Load a snapshot from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read registry snapshot {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Deserialize a snapshot from a JSON string and check its version.
    pub fn from_json(json: &str) -> Result<Self> {
        let registry: ModelRegistry =
            serde_json::from_str(json).context("failed to deserialize registry snapshot")?;
        registry.validate_version()?;
        Ok(registry)
    }

    fn validate_version(&self) -> Result<()> {
        if self.version != SNAPSHOT_VERSION {
            anyhow::bail!(
                "registry snapshot version mismatch: expected {}, found {}",
                SNAPSHOT_VERSION,
                self.version
            );
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.name == name)
    }

    /// The set of declared model names, for target lookups during
    /// classification.
    pub fn model_names(&self) -> BTreeSet<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }
}
