//! Check reference table
//!
//! Maps every check the scanning engine can report to its risk level. The
//! default table is embedded at compile time via `include_str!()` so scoring
//! needs no configuration.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Built-in check table
pub const BUILT_IN_CHECKS: &str = include_str!("built_in/checks.toml");

/// Risk level of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Risk {
    Critical,
    High,
    Medium,
    Low,
}

impl Risk {
    /// Weight of this risk level in the aggregate score
    pub fn weight(&self) -> f64 {
        match self {
            Self::Critical => 10.0,
            Self::High => 7.5,
            Self::Medium => 5.0,
            Self::Low => 2.5,
        }
    }
}

/// Reference entry for one check
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckDoc {
    pub risk: Risk,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct CheckDocsFile {
    #[serde(default)]
    checks: BTreeMap<String, CheckDoc>,
}

/// Read-only lookup table keyed by check name
#[derive(Debug, Clone, PartialEq)]
pub struct CheckDocs {
    checks: BTreeMap<String, CheckDoc>,
}

impl CheckDocs {
    /// Load the embedded check table
    ///
    /// # Example
    ///
    /// ```
    /// use depdiff_core::{CheckDocs, Risk};
    ///
    /// let docs = CheckDocs::built_in().unwrap();
    /// assert_eq!(docs.risk("Dangerous-Workflow"), Some(Risk::Critical));
    /// ```
    pub fn built_in() -> Result<Self> {
        Self::from_toml_str(BUILT_IN_CHECKS)
    }

    /// Parse a check table from TOML
    ///
    /// # Errors
    /// Fails on malformed TOML, unknown risk levels, or an empty table.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let file: CheckDocsFile =
            toml::from_str(toml_str).map_err(|source| Error::CheckDocs { source })?;

        if file.checks.is_empty() {
            return Err(Error::InvalidCheckDocs("no checks defined".to_string()));
        }

        Ok(Self {
            checks: file.checks,
        })
    }

    /// Look up a check's reference entry
    pub fn get(&self, name: &str) -> Option<&CheckDoc> {
        self.checks.get(name)
    }

    /// Risk level of a check, if known
    pub fn risk(&self, name: &str) -> Option<Risk> {
        self.get(name).map(|doc| doc.risk)
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }

    /// Iterate over check names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.checks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_table_loads() {
        let docs = CheckDocs::built_in().unwrap();
        assert_eq!(docs.len(), 19);
        assert_eq!(docs.risk("Code-Review"), Some(Risk::High));
        assert_eq!(docs.risk("CI-Tests"), Some(Risk::Low));
        assert_eq!(docs.risk("Fuzzing"), Some(Risk::Medium));
        assert!(docs.is_known("Webhooks"));
        assert!(!docs.is_known("code-review"));
    }

    #[test]
    fn test_risk_weights() {
        assert_eq!(Risk::Critical.weight(), 10.0);
        assert_eq!(Risk::High.weight(), 7.5);
        assert_eq!(Risk::Medium.weight(), 5.0);
        assert_eq!(Risk::Low.weight(), 2.5);
    }

    #[test]
    fn test_unknown_risk_is_rejected() {
        let result = CheckDocs::from_toml_str(
            r#"
[checks.Odd]
risk = "Severe"
"#,
        );
        assert!(matches!(result, Err(Error::CheckDocs { .. })));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let result = CheckDocs::from_toml_str("");
        assert!(matches!(result, Err(Error::InvalidCheckDocs(_))));
    }
}
