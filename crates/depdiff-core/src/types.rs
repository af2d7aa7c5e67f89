//! Core types for dependency-diff results

use crate::checks::CheckDocs;
use crate::error::ScoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a dependency changed between the base and head references
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Present in head only
    Added,
    /// Present in base only
    Removed,
    /// Present in both with a different version.
    ///
    /// Scanners never report this directly; it is inferred when a name shows
    /// up as both added and removed.
    Updated,
}

impl ChangeKind {
    /// Parse the lowercase wire name (`added`, `removed`, `updated`)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "added" => Some(Self::Added),
            "removed" => Some(Self::Removed),
            "updated" => Some(Self::Updated),
            _ => None,
        }
    }

    /// The lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Updated => "updated",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown change type '{s}'"))
    }
}

/// Result of a single check inside an assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check name as listed in the reference table (e.g. `Code-Review`)
    pub name: String,
    /// Score in `0..=10`, or negative when inconclusive
    pub score: i32,
    /// Short human-readable reason
    #[serde(default)]
    pub reason: String,
    /// Optional detail lines
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl CheckResult {
    /// Create a check result with an empty reason
    pub fn new(name: impl Into<String>, score: i32) -> Self {
        Self {
            name: name.into(),
            score,
            reason: String::new(),
            details: Vec::new(),
        }
    }

    /// Set the reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }
}

/// Quality assessment of one dependency, as produced by the scanning engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Repository the assessment was run against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Date of the assessment, as reported by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Individual check results
    #[serde(default)]
    pub checks: Vec<CheckResult>,
}

impl Assessment {
    /// Create an assessment from a list of checks
    pub fn from_checks(checks: Vec<CheckResult>) -> Self {
        Self {
            repo: None,
            date: None,
            checks,
        }
    }

    /// Compute the weighted aggregate score of all conclusive checks
    ///
    /// See [`crate::score`] for the weighting rules.
    ///
    /// # Errors
    /// Returns [`ScoreError::UnknownCheck`] if a check is missing from `docs`.
    pub fn aggregate_score(&self, docs: &CheckDocs) -> Result<f64, ScoreError> {
        crate::score::aggregate(&self.checks, docs)
    }
}

/// One dependency appearing in the diff between base and head
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyChangeRecord {
    /// Dependency name, the reconciliation key between buckets
    pub name: String,
    /// Resolved version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Package ecosystem (e.g. `npm`, `cargo`, `pypi`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecosystem: Option<String>,
    /// URL of the dependency's source repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_repository: Option<String>,
    /// Change kind; records without one are skipped by the classifier
    #[serde(default, alias = "changeType", skip_serializing_if = "Option::is_none")]
    pub change_kind: Option<ChangeKind>,
    /// Manifest the dependency was found in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_path: Option<String>,
    /// Quality assessment; absent when it failed or was not requested
    #[serde(default, alias = "scorecardResult", skip_serializing_if = "Option::is_none")]
    pub assessment: Option<Assessment>,
}

impl DependencyChangeRecord {
    /// Create a bare record with only a name and change kind
    pub fn new(name: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            name: name.into(),
            version: None,
            ecosystem: None,
            source_repository: None,
            change_kind: Some(kind),
            manifest_path: None,
            assessment: None,
        }
    }

    /// Set the version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the ecosystem
    pub fn with_ecosystem(mut self, ecosystem: impl Into<String>) -> Self {
        self.ecosystem = Some(ecosystem.into());
        self
    }

    /// Set the source repository URL
    pub fn with_source_repository(mut self, url: impl Into<String>) -> Self {
        self.source_repository = Some(url.into());
        self
    }

    /// Set the manifest path
    pub fn with_manifest_path(mut self, path: impl Into<String>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }

    /// Attach an assessment
    pub fn with_assessment(mut self, assessment: Assessment) -> Self {
        self.assessment = Some(assessment);
        self
    }
}
