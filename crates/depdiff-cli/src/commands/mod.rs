pub mod action;
pub mod annotate;
pub mod render;

pub use action::{handle_action_command, ActionCommand};
pub use annotate::{handle_annotate_command, AnnotateCommand};
pub use render::{handle_render_command, RenderCommand};

use anyhow::{Context, Result};
use depdiff_core::{DependencyChangeRecord, KnownInsights};
use depdiff_info::{prefetch_insights, DepsDevClient};

/// Resolve deps.dev links for added records, blocking on a fresh runtime
fn fetch_insights_blocking(records: &[DependencyChangeRecord]) -> Result<KnownInsights> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    runtime.block_on(fetch_insights(records))
}

async fn fetch_insights(records: &[DependencyChangeRecord]) -> Result<KnownInsights> {
    let client = DepsDevClient::new().context("Failed to create deps.dev client")?;
    prefetch_insights(&client, records)
        .await
        .context("Failed to look up dependencies on deps.dev")
}
