//! depdiff core - dependency-diff classification and report rendering.
//!
//! This crate turns the per-dependency results of a dependency-diff scan into
//! a deterministic markdown report and a set of check-run annotations. It
//! defines:
//!
//! - [`DependencyChangeRecord`]: One scanned dependency change
//! - [`classify`]: Partition records into added/removed buckets
//! - [`MarkdownRenderer`]: Rank, reconcile and render the report
//! - [`create_annotations`]: Per-dependency check-run annotations
//! - [`InsightsLookup`]: Seam for the optional deps.dev link
//!
//! # Architecture
//!
//! ```text
//! records ──▶ classify ──▶ ClassifiedSet ──▶ MarkdownRenderer ──▶ report
//!                                              │
//!                              CheckDocs ──────┤ (aggregate scores)
//!                              InsightsLookup ─┘ (deps.dev tags)
//! ```
//!
//! Nothing in this crate performs I/O. Existence lookups against deps.dev are
//! resolved ahead of time (see `depdiff-info`) and handed in through
//! [`InsightsLookup`].
//!
//! # Example
//!
//! ```
//! use depdiff_core::{render_markdown, CheckDocs, DependencyChangeRecord, ChangeKind, NoInsights};
//!
//! let records = vec![DependencyChangeRecord::new("left-pad", ChangeKind::Added)];
//! let docs = CheckDocs::built_in()?;
//! let report = render_markdown(&records, "main", "feature", &docs, &NoInsights)?;
//! assert!(report.contains("left-pad"));
//! # Ok::<(), depdiff_core::Error>(())
//! ```

pub mod annotations;
pub mod checks;
pub mod classify;
pub mod error;
pub mod insights;
pub mod render;
pub mod score;
pub mod types;

pub use annotations::{
    create_annotations, Annotation, AnnotationLevel, CheckRunOutput, CHECK_RUN_NAME,
    CHECK_RUN_TITLE,
};
pub use checks::{CheckDoc, CheckDocs, Risk};
pub use classify::{classify, Bucket, ClassifiedSet};
pub use error::{Error, LookupError, RenderStage, Result, ScoreError};
pub use insights::{deps_dev_url, InsightsLookup, KnownInsights, NoInsights};
pub use render::{render_markdown, MarkdownRenderer};
pub use score::{RankKey, INCONCLUSIVE_SCORE, MIN_RESULT_SCORE};
pub use types::{Assessment, ChangeKind, CheckResult, DependencyChangeRecord};
