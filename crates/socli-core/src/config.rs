//! Configuration management for the Neo4j endpoint.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`SOCLI__NEO4J__URI`, `SOCLI__NEO4J__USER`, `SOCLI__NEO4J__PASSWORD`)
//! 2. Config file (`socli.toml`, `[neo4j]` table)
//! 3. Defaults
//!
//! When neither the file nor the environment names an endpoint, the shell
//! prompts for one and writes it back with [`ConfigFile::save`].

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SocliError;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "socli.toml";

pub const DEFAULT_URI: &str = "bolt://localhost:7687";
pub const DEFAULT_USER: &str = "neo4j";

/// Connection details for the Neo4j store.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Neo4jSettings {
    #[serde(default = "default_uri")]
    pub uri: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default)]
    pub password: String,
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: String::new(),
        }
    }
}

impl fmt::Debug for Neo4jSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neo4jSettings")
            .field("uri", &self.uri)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

fn default_uri() -> String {
    DEFAULT_URI.to_string()
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

/// On-disk layout of `socli.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigFile {
    pub neo4j: Neo4jSettings,
}

impl ConfigFile {
    /// Load settings from `path` layered under `SOCLI__` environment variables.
    ///
    /// Returns `Ok(None)` when the file is absent and the environment names
    /// no endpoint, so the caller can prompt for one.
    pub fn load(path: &Path) -> Result<Option<Neo4jSettings>, SocliError> {
        let cfg = config::Config::builder()
            .add_source(
                config::File::new(&path.to_string_lossy(), config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(config::Environment::with_prefix("SOCLI").separator("__"))
            .build()?;

        match cfg.get::<Neo4jSettings>("neo4j") {
            Ok(settings) => Ok(Some(settings)),
            Err(config::ConfigError::NotFound(_)) if path.exists() => {
                tracing::warn!(path = %path.display(), "No [neo4j] table in config, using defaults");
                Ok(Some(Neo4jSettings::default()))
            }
            Err(config::ConfigError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write settings to `path` verbatim, password included.
    pub fn save(path: &Path, settings: &Neo4jSettings) -> Result<(), SocliError> {
        let file = ConfigFile {
            neo4j: settings.clone(),
        };
        let body = toml::to_string_pretty(&file)?;
        std::fs::write(path, body)?;
        tracing::info!(path = %path.display(), "Saved Neo4j configuration");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Neo4jSettings::default();
        assert_eq!(settings.uri, "bolt://localhost:7687");
        assert_eq!(settings.user, "neo4j");
        assert!(settings.password.is_empty());
    }

    #[test]
    fn test_debug_masks_password() {
        let settings = Neo4jSettings {
            password: "s3cret".to_string(),
            ..Default::default()
        };
        let shown = format!("{settings:?}");
        assert!(!shown.contains("s3cret"));
        assert!(shown.contains("bolt://localhost:7687"));
    }

    #[test]
    fn test_missing_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ConfigFile::load(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("socli.toml");
        let settings = Neo4jSettings {
            uri: "neo4j+s://example.databases.neo4j.io".to_string(),
            user: "admin".to_string(),
            password: "pw".to_string(),
        };

        ConfigFile::save(&path, &settings).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("[neo4j]"));

        let loaded = ConfigFile::load(&path).unwrap();
        assert_eq!(loaded, Some(settings));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("socli.toml");
        std::fs::write(&path, "[neo4j]\npassword = \"pw\"\n").unwrap();

        let loaded = ConfigFile::load(&path).unwrap().unwrap();
        assert_eq!(loaded.uri, DEFAULT_URI);
        assert_eq!(loaded.user, DEFAULT_USER);
        assert_eq!(loaded.password, "pw");
    }
}
