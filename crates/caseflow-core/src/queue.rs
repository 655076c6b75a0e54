//! Approval queue ordering.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Case;
use crate::enums::{CaseComplexity, CaseStatus};

/// Priority gained per day spent waiting for review.
pub const PRIORITY_PER_DAY: f64 = 0.5;

/// Hours a case may wait in review before it is flagged overdue.
pub const DEFAULT_REVIEW_TIME_LIMIT_HOURS: u32 = 72;

/// One case waiting for review, with its computed priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QueueEntry {
    pub case_id: String,
    pub title: String,
    pub complexity: CaseComplexity,
    pub submitted_by: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub hours_in_queue: f64,
    pub priority: f64,
    /// Waited longer than the review time limit.
    pub overdue: bool,
}

/// Hours since the case was submitted, clamped at zero. Cases with no
/// submission stamp have waited zero hours.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn hours_in_queue(case: &Case, now: DateTime<Utc>) -> f64 {
    case.submitted_for_review_at.map_or(0.0, |at| {
        ((now - at).num_seconds().max(0) as f64) / 3600.0
    })
}

/// `complexity_weight + (hours / 24) * 0.5`.
#[must_use]
pub fn queue_priority(complexity: CaseComplexity, hours: f64) -> f64 {
    (hours / 24.0).mul_add(PRIORITY_PER_DAY, complexity.queue_weight())
}

/// Rank the `in_review` cases in `cases`, highest priority first.
///
/// Ties fall back to the earlier submission, then to the case id, so the
/// order is stable across calls. Entries that have waited longer than
/// `review_time_limit_hours` are marked `overdue`.
#[must_use]
pub fn rank_queue(
    cases: &[Case],
    now: DateTime<Utc>,
    review_time_limit_hours: u32,
) -> Vec<QueueEntry> {
    let mut entries: Vec<QueueEntry> = cases
        .iter()
        .filter(|c| c.status == CaseStatus::InReview)
        .map(|c| {
            let hours = hours_in_queue(c, now);
            QueueEntry {
                case_id: c.id.clone(),
                title: c.title.clone(),
                complexity: c.complexity,
                submitted_by: c.submitted_for_review_by.clone(),
                submitted_at: c.submitted_for_review_at,
                hours_in_queue: hours,
                priority: queue_priority(c.complexity, hours),
                overdue: hours > f64::from(review_time_limit_hours),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.priority
            .total_cmp(&a.priority)
            .then_with(|| a.submitted_at.cmp(&b.submitted_at))
            .then_with(|| a.case_id.cmp(&b.case_id))
    });
    entries
}
