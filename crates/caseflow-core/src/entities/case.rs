use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{CaseComplexity, CaseStatus};

/// A generated clinical-education case under lifecycle control.
///
/// The `*_by` / `*_at` stamps are written by their matching transition and
/// never cleared; a rejection keeps the reviewer stamps of earlier rounds.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Case {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub complexity: CaseComplexity,
    pub status: CaseStatus,

    /// Latest recorded validation score in `[0, 100]`; `None` until recorded.
    pub validation_score: Option<f64>,
    /// Whether the recorded validation run passed.
    pub validated: bool,
    /// Opaque scorer report of the recorded run.
    pub validation_results: Option<serde_json::Value>,
    pub last_validated_at: Option<DateTime<Utc>>,

    /// Running mean of all ratings folded so far.
    pub rating: Option<f64>,
    pub rating_count: u32,

    pub submitted_for_review_by: Option<String>,
    pub submitted_for_review_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub archived_by: Option<String>,
    pub archived_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// Whether a validation run has already been recorded for this case.
    #[must_use]
    pub const fn has_recorded_validation(&self) -> bool {
        self.validated && self.validation_results.is_some()
    }
}
