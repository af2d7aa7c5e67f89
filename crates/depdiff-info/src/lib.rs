//! Network side of depdiff: deps.dev lookups and GitHub publishing
//!
//! The core crate never performs I/O. This crate resolves the deps.dev
//! existence answers the renderer needs up front, and publishes the finished
//! report and annotations to GitHub.
//!
//! # Example
//!
//! ```no_run
//! use depdiff_core::{render_markdown, CheckDocs, DependencyChangeRecord, ChangeKind};
//! use depdiff_info::{prefetch_insights, DepsDevClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let records = vec![DependencyChangeRecord::new("react", ChangeKind::Added)
//!         .with_ecosystem("npm")
//!         .with_version("18.2.0")];
//!
//!     let client = DepsDevClient::new()?;
//!     let insights = prefetch_insights(&client, &records).await?;
//!
//!     let docs = CheckDocs::built_in()?;
//!     let report = render_markdown(&records, "main", "feature", &docs, &insights)?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```

mod client;
mod deps_dev;
mod error;
mod github;

pub use client::HttpClient;
pub use deps_dev::{prefetch_insights, DepsDevClient, PackageExistence};
pub use error::{Error, Result};
pub use github::{CheckRun, GitHubClient, IssueComment, MAX_ANNOTATIONS_PER_REQUEST};
