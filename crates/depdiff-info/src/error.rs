//! Error types for depdiff-info

use thiserror::Error;

/// Result type alias for depdiff-info operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for depdiff-info operations
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization failed
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Unexpected HTTP status
    #[error("HTTP request failed with status {status}: {url}")]
    Status { status: u16, url: String },

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// deps.dev lookup failed for a dependency
    #[error("deps.dev lookup failed for '{dependency}': {source}")]
    Lookup {
        dependency: String,
        #[source]
        source: Box<Error>,
    },

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded for URL: {0}")]
    RateLimitExceeded(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
