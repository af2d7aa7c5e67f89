use crate::action::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional `depdiff.toml` overrides
///
/// ```toml
/// checks = ["Code-Review", "Maintained"]
/// change_types = ["added", "removed"]
/// comment = true
/// check_run = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Checks to request when the environment names none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<String>>,

    /// Change kinds to report when the environment names none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_types: Option<Vec<String>>,

    /// Post the report as a pull request comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<bool>,

    /// Create a check run with per-dependency annotations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_run: Option<bool>,
}

impl FileConfig {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}
