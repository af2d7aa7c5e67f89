//! Loading scan results.

use anyhow::{Context, Result};
use depdiff_core::{ChangeKind, DependencyChangeRecord};
use std::io::Read;
use std::path::Path;

/// Read a JSON array of records from a file, or stdin when `path` is `-`
pub fn read_records(path: &Path) -> Result<Vec<DependencyChangeRecord>> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read scan results from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scan results from {}", path.display()))?
    };

    parse_records(&contents)
        .with_context(|| format!("Invalid scan results in {}", path.display()))
}

pub fn parse_records(contents: &str) -> Result<Vec<DependencyChangeRecord>> {
    let records: Vec<DependencyChangeRecord> = serde_json::from_str(contents)?;
    tracing::debug!(count = records.len(), "loaded scan results");
    Ok(records)
}

/// Keep records whose change kind passes `include`
///
/// Records without a change kind are kept; the classifier drops them.
pub fn filter_change_kinds(
    records: Vec<DependencyChangeRecord>,
    include: impl Fn(ChangeKind) -> bool,
) -> Vec<DependencyChangeRecord> {
    records
        .into_iter()
        .filter(|r| r.change_kind.map_or(true, &include))
        .collect()
}
