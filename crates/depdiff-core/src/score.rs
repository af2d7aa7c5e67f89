//! Aggregate scoring and ranking keys
//!
//! The aggregate score is the risk-weighted mean of all conclusive check
//! scores. A check is inconclusive when its score is below
//! [`MIN_RESULT_SCORE`]; if every check is inconclusive the aggregate is
//! [`INCONCLUSIVE_SCORE`].

use crate::checks::CheckDocs;
use crate::error::ScoreError;
use crate::types::CheckResult;
use std::cmp::Ordering;

/// Lowest conclusive check score
pub const MIN_RESULT_SCORE: i32 = 0;

/// Aggregate returned when no check was conclusive
pub const INCONCLUSIVE_SCORE: f64 = -1.0;

pub(crate) fn aggregate(checks: &[CheckResult], docs: &CheckDocs) -> Result<f64, ScoreError> {
    let mut total = 0.0;
    let mut score = 0.0;

    for check in checks {
        let risk = docs
            .risk(&check.name)
            .ok_or_else(|| ScoreError::UnknownCheck(check.name.clone()))?;

        if check.score < MIN_RESULT_SCORE {
            continue;
        }

        let weight = risk.weight();
        total += weight;
        score += weight * f64::from(check.score);
    }

    if total == 0.0 {
        return Ok(INCONCLUSIVE_SCORE);
    }

    Ok(score / total)
}

/// Sort key of a dependency in the report
///
/// `Unknown` (no assessment available) orders after every `Known` score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RankKey {
    Known(f64),
    Unknown,
}

impl RankKey {
    /// Build a key from an optional score
    pub fn from_score(score: Option<f64>) -> Self {
        score.map_or(Self::Unknown, Self::Known)
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Known(score) => Some(*score),
            Self::Unknown => None,
        }
    }

    /// Descending comparator: higher scores first, `Unknown` last
    ///
    /// Two `Unknown` keys compare equal so a stable sort keeps their input
    /// order.
    pub fn cmp_desc(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Known(a), Self::Known(b)) => b.total_cmp(a),
            (Self::Known(_), Self::Unknown) => Ordering::Less,
            (Self::Unknown, Self::Known(_)) => Ordering::Greater,
            (Self::Unknown, Self::Unknown) => Ordering::Equal,
        }
    }
}
