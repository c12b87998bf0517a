//! Board configuration
//!
//! Loaded from a YAML file. Every field has a default, so a partial file (or
//! no file at all) is fine.
//!
//! ```yaml
//! storage_dir: ./lineup-data
//! default_template: 4-4-2
//! preserve_assignments: true
//! roster_path: ./roster.json
//! export_dir: ./exports
//! ```
//!
//! ## Environment Variables
//!
//! - `LINEUP_CONFIG_PATH`: path of the YAML file used by [`BoardConfig::from_env`]

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tactics::{TemplateCatalog, DEFAULT_TEMPLATE};

pub const CONFIG_PATH_ENV: &str = "LINEUP_CONFIG_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Default template '{0}' is not in the catalog")]
    UnknownTemplate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Root of the file store
    pub storage_dir: PathBuf,
    /// Template opened when none is asked for
    pub default_template: String,
    /// Carry players over on template switch unless told otherwise
    pub preserve_assignments: bool,
    pub roster_path: Option<PathBuf>,
    pub export_dir: PathBuf,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("lineup-data"),
            default_template: DEFAULT_TEMPLATE.to_string(),
            preserve_assignments: false,
            roster_path: None,
            export_dir: PathBuf::from("exports"),
        }
    }
}

impl BoardConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // an empty document deserializes to unit, not to an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_yaml(&yaml)?;
        tracing::debug!(path = ?path, template = %config.default_template, "Loaded board config");
        Ok(config)
    }

    /// Config from the file named by `LINEUP_CONFIG_PATH`, defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self, catalog: &TemplateCatalog) -> Result<(), ConfigError> {
        if !catalog.contains(&self.default_template) {
            return Err(ConfigError::UnknownTemplate(self.default_template.clone()));
        }
        Ok(())
    }
}
