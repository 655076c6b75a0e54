use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::entities::Case;
use crate::enums::{CaseComplexity, CaseStatus};

/// Fixed instant so planned timestamps are deterministic.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap()
}

/// Builder for in-memory `Case` snapshots.
pub struct CaseFixture {
    case: Case,
}

impl CaseFixture {
    pub fn new(status: CaseStatus) -> Self {
        Self {
            case: Case {
                id: "cas-0000abcd".into(),
                project_id: "prj-0000abcd".into(),
                title: "Chest pain in a 54-year-old".into(),
                complexity: CaseComplexity::Basic,
                status,
                validation_score: None,
                validated: false,
                validation_results: None,
                last_validated_at: None,
                rating: None,
                rating_count: 0,
                submitted_for_review_by: None,
                submitted_for_review_at: None,
                reviewed_by: None,
                reviewed_at: None,
                published_at: None,
                archived_by: None,
                archived_at: None,
                created_at: t0() - Duration::days(3),
                updated_at: t0() - Duration::days(3),
            },
        }
    }

    pub fn draft() -> Self {
        Self::new(CaseStatus::Draft)
    }

    pub fn in_review() -> Self {
        Self::new(CaseStatus::InReview)
    }

    pub fn approved() -> Self {
        Self::new(CaseStatus::Approved)
    }

    pub fn id(mut self, id: &str) -> Self {
        self.case.id = id.into();
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.case.validation_score = Some(score);
        self
    }

    /// Mark a passing validation run as recorded.
    pub fn recorded(mut self, report: Value) -> Self {
        self.case.validated = true;
        self.case.validation_results = Some(report);
        self
    }

    pub fn complexity(mut self, complexity: CaseComplexity) -> Self {
        self.case.complexity = complexity;
        self
    }

    pub fn submitted_at(mut self, at: DateTime<Utc>) -> Self {
        self.case.submitted_for_review_by = Some("author".into());
        self.case.submitted_for_review_at = Some(at);
        self
    }

    pub fn reviewed(mut self, by: &str, at: DateTime<Utc>) -> Self {
        self.case.reviewed_by = Some(by.into());
        self.case.reviewed_at = Some(at);
        self
    }

    pub fn build(self) -> Case {
        self.case
    }
}
