//! Check-run annotations for dependency-diff results
//!
//! One annotation per scanned record. The scanner walks manifests without
//! line information, so every annotation points at line 1 of the manifest.

use crate::checks::CheckDocs;
use crate::error::{Error, RenderStage, Result};
use crate::types::DependencyChangeRecord;
use serde::Serialize;
use std::fmt::Write as _;

/// Name of the check run carrying the annotations
pub const CHECK_RUN_NAME: &str = "Scorecard Action Dependency-diff";

/// Title of the check-run output
pub const CHECK_RUN_TITLE: &str = "Scorecard Action Dependency-diff check results";

/// Severity of an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationLevel {
    Notice,
}

/// Inline annotation in the check-run shape of the hosting API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub annotation_level: AnnotationLevel,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_details: Option<String>,
}

/// Output block of a check run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckRunOutput {
    pub title: String,
    pub summary: String,
    pub annotations: Vec<Annotation>,
}

impl CheckRunOutput {
    /// Wrap annotations under the fixed check-run title
    pub fn new(annotations: Vec<Annotation>) -> Self {
        let summary = format!("{} dependency change(s) annotated.", annotations.len());
        Self {
            title: CHECK_RUN_TITLE.to_string(),
            summary,
            annotations,
        }
    }
}

/// Build one annotation per record
///
/// Records are not classified first: every input record, including ones
/// without a change kind, gets an annotation.
///
/// # Errors
/// Fails if any assessment cannot be scored.
pub fn create_annotations(
    records: &[DependencyChangeRecord],
    docs: &CheckDocs,
) -> Result<Vec<Annotation>> {
    records
        .iter()
        .map(|record| annotation_for(record, docs))
        .collect()
}

fn annotation_for(record: &DependencyChangeRecord, docs: &CheckDocs) -> Result<Annotation> {
    let title = match (&record.change_kind, &record.version) {
        (Some(kind), Some(version)) => {
            format!("{kind} dependency: {} @ {version}", record.name)
        }
        _ => record.name.clone(),
    };

    let (message, raw_details) = match &record.assessment {
        None => (None, None),
        Some(assessment) => {
            let aggregate =
                assessment
                    .aggregate_score(docs)
                    .map_err(|source| Error::ScoreComputation {
                        dependency: record.name.clone(),
                        stage: RenderStage::Annotate,
                        source,
                    })?;

            let mut msg = String::from("Scorecard check results: \n");
            let _ = writeln!(msg, "Aggregate Score: {aggregate:.1}");
            for check in &assessment.checks {
                let _ = writeln!(
                    msg,
                    "Check name: {}, score: {:.1}, reason: {}",
                    check.name,
                    f64::from(check.score),
                    check.reason
                );
            }
            (Some(msg), Some(serde_json::to_string_pretty(assessment)?))
        }
    };

    Ok(Annotation {
        path: record.manifest_path.clone().unwrap_or_default(),
        start_line: 1,
        end_line: 1,
        annotation_level: AnnotationLevel::Notice,
        title,
        message,
        raw_details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Assessment, ChangeKind, CheckResult};

    fn docs() -> CheckDocs {
        CheckDocs::built_in().unwrap()
    }

    #[test]
    fn test_annotation_without_assessment() {
        let records = vec![DependencyChangeRecord::new("left-pad", ChangeKind::Added)
            .with_version("1.3.0")
            .with_manifest_path("package.json")];

        let annotations = create_annotations(&records, &docs()).unwrap();
        assert_eq!(annotations.len(), 1);

        let a = &annotations[0];
        assert_eq!(a.path, "package.json");
        assert_eq!((a.start_line, a.end_line), (1, 1));
        assert_eq!(a.annotation_level, AnnotationLevel::Notice);
        assert_eq!(a.title, "added dependency: left-pad @ 1.3.0");
        assert_eq!(a.message, None);
        assert_eq!(a.raw_details, None);
    }

    #[test]
    fn test_title_falls_back_to_name() {
        let records = vec![DependencyChangeRecord::new("left-pad", ChangeKind::Removed)];
        let annotations = create_annotations(&records, &docs()).unwrap();
        assert_eq!(annotations[0].title, "left-pad");
        assert_eq!(annotations[0].path, "");
    }

    #[test]
    fn test_message_lists_checks() {
        let assessment = Assessment::from_checks(vec![
            CheckResult::new("Code-Review", 10).with_reason("all changesets reviewed"),
            CheckResult::new("CI-Tests", 2).with_reason("few tests"),
        ]);
        let records = vec![DependencyChangeRecord::new("serde", ChangeKind::Added)
            .with_version("1.0.0")
            .with_assessment(assessment)];

        let annotations = create_annotations(&records, &docs()).unwrap();
        let message = annotations[0].message.as_deref().unwrap();
        assert_eq!(
            message,
            "Scorecard check results: \n\
             Aggregate Score: 8.0\n\
             Check name: Code-Review, score: 10.0, reason: all changesets reviewed\n\
             Check name: CI-Tests, score: 2.0, reason: few tests\n"
        );
        assert!(annotations[0].raw_details.as_deref().unwrap().contains("Code-Review"));
    }

    #[test]
    fn test_score_failure_aborts() {
        let records = vec![
            DependencyChangeRecord::new("ok", ChangeKind::Added),
            DependencyChangeRecord::new("bad", ChangeKind::Added)
                .with_assessment(Assessment::from_checks(vec![CheckResult::new("Nope", 1)])),
        ];
        let err = create_annotations(&records, &docs()).unwrap_err();
        assert!(matches!(
            err,
            Error::ScoreComputation { stage: RenderStage::Annotate, .. }
        ));
    }

    #[test]
    fn test_check_run_output_serializes() {
        let records = vec![DependencyChangeRecord::new("a", ChangeKind::Added)];
        let output = CheckRunOutput::new(create_annotations(&records, &docs()).unwrap());
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["title"], CHECK_RUN_TITLE);
        assert_eq!(json["annotations"][0]["annotation_level"], "notice");
        assert!(json["annotations"][0].get("message").is_none());
    }
}
