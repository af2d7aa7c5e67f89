//! Error types for depdiff core.

use std::fmt;
use thiserror::Error;

/// Result type for depdiff operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while scoring, rendering or annotating.
///
/// Every variant is fatal to the operation that raised it: callers either get
/// a complete report or an error, never a partial one.
#[derive(Debug, Error)]
pub enum Error {
    /// A required context value (base/head label, ...) was not provided.
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// An assessment could not be reduced to an aggregate score.
    #[error("Failed to compute aggregate score for '{dependency}' during {stage}: {source}")]
    ScoreComputation {
        /// Name of the dependency whose assessment failed.
        dependency: String,
        /// Where in the pipeline the failure happened.
        stage: RenderStage,
        /// The underlying scoring error.
        #[source]
        source: ScoreError,
    },

    /// The deps.dev existence lookup failed.
    #[error("Insights lookup failed for '{dependency}': {source}")]
    Lookup {
        /// Name of the dependency being looked up.
        dependency: String,
        /// The underlying lookup error.
        #[source]
        source: LookupError,
    },

    /// The embedded check reference table could not be parsed.
    #[error("Check reference table parse error: {source}")]
    CheckDocs {
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// The check reference table parsed but holds invalid data.
    #[error("Invalid check reference table: {0}")]
    InvalidCheckDocs(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure reducing an [`Assessment`](crate::Assessment) to a single score.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    /// The assessment references a check missing from the reference table.
    #[error("unknown check '{0}'")]
    UnknownCheck(String),
}

/// Failure reported by an [`InsightsLookup`](crate::InsightsLookup).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct LookupError(pub String);

impl LookupError {
    /// Create a new lookup error from any message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Pipeline stage, carried in errors for log context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    /// Ranking the added bucket.
    RankAdded,
    /// Ranking the removed bucket.
    RankRemoved,
    /// Building check-run annotations.
    Annotate,
}

impl fmt::Display for RenderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::RankAdded => "ranking of added dependencies",
            Self::RankRemoved => "ranking of removed dependencies",
            Self::Annotate => "annotation",
        };
        f.write_str(s)
    }
}
