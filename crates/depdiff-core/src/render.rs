//! Markdown rendering of dependency-diff results
//!
//! Each bucket is ranked by aggregate score (descending, stable, unassessed
//! last). Added entries are rendered first; a name that is also in the
//! removed bucket is tagged as updated and shows both versions. Removed
//! entries follow, minus the ones already shown as updates.

use crate::checks::CheckDocs;
use crate::classify::{classify, Bucket, ClassifiedSet};
use crate::error::{Error, RenderStage, Result};
use crate::insights::{deps_dev_url, InsightsLookup};
use crate::score::{RankKey, INCONCLUSIVE_SCORE};
use crate::types::{ChangeKind, DependencyChangeRecord};

const REPORT_TITLE: &str =
    "# [Scorecard Action](https://github.com/ossf/scorecard-action) Dependency-diff Report";

const NO_CHANGES: &str = "No dependency changes found.";

const EXPERIMENTAL_NOTICE: &str = "> This is an experimental feature of the \
[Scorecard Action](https://github.com/ossf/scorecard-action). \
The [scores](https://github.com/ossf/scorecard#scoring) are aggregate scores calculated by the checks specified in the workflow file. \
Please refer to [Scorecard Checks](https://github.com/ossf/scorecard#scorecard-checks) for more details. \
Please also see the corresponding [deps.dev](https://deps.dev/) tag for a more comprehensive view of your dependencies.";

/// Renders a [`ClassifiedSet`] as a markdown report
pub struct MarkdownRenderer<'a> {
    docs: &'a CheckDocs,
    insights: &'a dyn InsightsLookup,
}

impl<'a> MarkdownRenderer<'a> {
    pub fn new(docs: &'a CheckDocs, insights: &'a dyn InsightsLookup) -> Self {
        Self { docs, insights }
    }

    /// Render the full report
    ///
    /// # Errors
    /// Fails if `base` or `head` is empty, if any assessment cannot be
    /// scored, or if an insights lookup fails. No partial report is returned.
    pub fn render(&self, set: &ClassifiedSet, base: &str, head: &str) -> Result<String> {
        if base.is_empty() {
            return Err(Error::MissingConfiguration("base reference".to_string()));
        }
        if head.is_empty() {
            return Err(Error::MissingConfiguration("head reference".to_string()));
        }

        let added_keys = self.rank(&set.added, RenderStage::RankAdded)?;
        let removed_keys = self.rank(&set.removed, RenderStage::RankRemoved)?;

        let mut results = String::new();
        for (name, key) in &added_keys {
            if let Some(entry) = self.added_entry(set, name, *key)? {
                results.push_str(&entry);
                results.push_str("\n\n");
            }
        }
        for (name, key) in &removed_keys {
            if let Some(entry) = removed_entry(set, name, *key) {
                results.push_str(&entry);
                results.push_str("\n\n");
            }
        }

        let mut out = String::new();
        out.push_str(REPORT_TITLE);
        out.push_str("\n\n");
        out.push_str(&format!(
            "Dependency-diffs (changes) between the BASE reference `{base}` and the HEAD reference `{head}`:\n\n"
        ));
        if results.is_empty() {
            out.push_str(NO_CHANGES);
        } else {
            out.push_str(&results);
        }
        out.push('\n');
        out.push_str(EXPERIMENTAL_NOTICE);

        tracing::debug!(
            added = set.added.len(),
            removed = set.removed.len(),
            bytes = out.len(),
            "rendered dependency-diff report"
        );

        Ok(out)
    }

    /// Score every record of a bucket and sort descending
    ///
    /// Names come out of the bucket in first-insertion order, and the sort is
    /// stable, so ties keep input order across runs.
    fn rank<'b>(&self, bucket: &'b Bucket, stage: RenderStage) -> Result<Vec<(&'b str, RankKey)>> {
        let mut keys = bucket
            .iter()
            .map(|record| {
                let score = record
                    .assessment
                    .as_ref()
                    .map(|assessment| assessment.aggregate_score(self.docs))
                    .transpose()
                    .map_err(|source| Error::ScoreComputation {
                        dependency: record.name.clone(),
                        stage,
                        source,
                    })?;
                Ok((record.name.as_str(), RankKey::from_score(score)))
            })
            .collect::<Result<Vec<_>>>()?;

        keys.sort_by(|(_, a), (_, b)| a.cmp_desc(b));
        Ok(keys)
    }

    fn added_entry(&self, set: &ClassifiedSet, name: &str, key: RankKey) -> Result<Option<String>> {
        let Some(new) = set.added.get(name) else {
            return Ok(None);
        };
        let old = set.removed.get(name);

        let mut current = added_tag();
        if old.is_some() {
            current.push_str(&updated_tag());
        }
        if let (Some(ecosystem), Some(version)) = (&new.ecosystem, &new.version) {
            let known = self
                .insights
                .exists(ecosystem, &new.name, version)
                .map_err(|source| Error::Lookup {
                    dependency: new.name.clone(),
                    source,
                })?;
            if known {
                current.push_str(&deps_dev_tag(ecosystem, &new.name));
            }
        }
        current.push_str(&score_tag(key));
        current.push_str(&package_fragment(new));
        if let Some(old) = old {
            current.push_str(&package_fragment(old));
        }

        Ok(Some(current))
    }
}

fn removed_entry(set: &ClassifiedSet, name: &str, key: RankKey) -> Option<String> {
    if set.added.contains(name) {
        // Already rendered as an update.
        return None;
    }
    let old = set.removed.get(name)?;

    let mut current = removed_tag();
    if key.score() != Some(INCONCLUSIVE_SCORE) {
        current.push_str(&score_tag(key));
    }
    current.push_str(&package_fragment(old));
    Some(current)
}

/// Classify `records` and render them in one step
///
/// # Example
///
/// ```
/// use depdiff_core::{render_markdown, CheckDocs, NoInsights};
///
/// let docs = CheckDocs::built_in()?;
/// let report = render_markdown(&[], "main", "feature", &docs, &NoInsights)?;
/// assert!(report.contains("No dependency changes found."));
/// # Ok::<(), depdiff_core::Error>(())
/// ```
pub fn render_markdown(
    records: &[DependencyChangeRecord],
    base: &str,
    head: &str,
    docs: &CheckDocs,
    insights: &dyn InsightsLookup,
) -> Result<String> {
    let set = classify(records);
    MarkdownRenderer::new(docs, insights).render(&set, base, head)
}

fn added_tag() -> String {
    " :sparkles: **`added`** ".to_string()
}

fn updated_tag() -> String {
    " **`updated`** ".to_string()
}

fn removed_tag() -> String {
    " ~~**`removed`**~~ ".to_string()
}

fn score_tag(key: RankKey) -> String {
    match key {
        RankKey::Known(score) => format!("`Aggregate Score: {score:.1}` "),
        RankKey::Unknown => String::new(),
    }
}

fn deps_dev_tag(ecosystem: &str, name: &str) -> String {
    format!(" **`[deps.dev]({})`** ", deps_dev_url(ecosystem, name))
}

/// Display fragment of one record: name, optional link and version, struck
/// through when the record itself is a removal
fn package_fragment(record: &DependencyChangeRecord) -> String {
    let mut result = format!(" {}", record.name);
    if let Some(repo) = &record.source_repository {
        result = format!("[{result}]({repo})");
    }
    if let Some(version) = &record.version {
        result.push_str(&format!(" @ {version}"));
    }
    if record.change_kind == Some(ChangeKind::Removed) {
        result = format!(" ~~{}~~ ", result.trim());
    }
    result
}
