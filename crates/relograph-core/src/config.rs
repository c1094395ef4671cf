//! Configuration for graph generation.
//!
//! Load order: `.relograph/config.toml` → environment variables → defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level relograph configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelographConfig {
    pub registry: RegistryConfig,
    pub render: RenderConfig,
}

/// Where to find the model-registry snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Path to the snapshot, relative to the project root when not
    /// absolute.
    pub snapshot: PathBuf,
}

/// Rendering defaults; the CLI flag overrides these per invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Retain Excluded-scope models in their own cluster.
    pub show_excluded: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from("model-registry.json"),
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl RelographConfig {
    /// Load config from `.relograph/config.toml` in the project root, with
    /// env var overrides. Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".relograph").join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        env_override("RELOGRAPH_SNAPSHOT", &mut config.registry.snapshot);
        env_override("RELOGRAPH_SHOW_EXCLUDED", &mut config.render.show_excluded);

        Ok(config)
    }

    /// The snapshot path resolved against the project root.
    pub fn snapshot_path(&self, project_root: &Path) -> PathBuf {
        if self.registry.snapshot.is_absolute() {
            self.registry.snapshot.clone()
        } else {
            project_root.join(&self.registry.snapshot)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RelographConfig::default();
        assert_eq!(
            config.registry.snapshot,
            PathBuf::from("model-registry.json")
        );
        assert!(!config.render.show_excluded);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[registry]
snapshot = "exports/registry.json"

[render]
show_excluded = true
"#;
        let config: RelographConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.registry.snapshot,
            PathBuf::from("exports/registry.json")
        );
        assert!(config.render.show_excluded);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let config = RelographConfig::load(Path::new("/nonexistent/path")).unwrap();
        assert_eq!(
            config.registry.snapshot,
            PathBuf::from("model-registry.json")
        );
    }

    #[test]
    fn test_config_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".relograph");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.toml"),
            r#"
[render]
show_excluded = true
"#,
        )
        .unwrap();

        let config = RelographConfig::load(tmp.path()).unwrap();
        assert!(config.render.show_excluded);
    }

    #[test]
    fn test_snapshot_path_resolution() {
        let config = RelographConfig::default();
        assert_eq!(
            config.snapshot_path(Path::new("/srv/app")),
            PathBuf::from("/srv/app/model-registry.json")
        );
    }
}
