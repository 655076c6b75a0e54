//! Workflow error taxonomy.
//!
//! Every guard failure names the precondition that failed. Storage errors are
//! defined in `caseflow-db` and wrap this type transparently.

use thiserror::Error;

use crate::enums::{CaseStatus, Transition};

/// Errors produced by lifecycle operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    /// The case does not exist within the given project.
    #[error("Case not found: {case_id} in project {project_id}")]
    NotFound { case_id: String, project_id: String },

    /// The project id does not resolve. Shares the `NOT_FOUND` code.
    #[error("Project not found: {project_id}")]
    ProjectNotFound { project_id: String },

    /// The transition's source state does not match the case's current status.
    #[error("Cannot {transition} a case in state {actual} (expected {})", join_states(.expected))]
    WrongState {
        transition: Transition,
        expected: Vec<CaseStatus>,
        actual: CaseStatus,
    },

    /// Submission requires a recorded validation score.
    #[error("Case {case_id} has no validation score; validate it before submitting for review")]
    MissingValidation { case_id: String },

    /// The recorded score is under the configured threshold.
    #[error("Validation score {score} is below the required threshold of {threshold}")]
    BelowThreshold { score: f64, threshold: f64 },

    /// Reject was called without a usable reason.
    #[error("A rejection reason is required")]
    MissingReason,

    /// Archive was attempted on a published case.
    #[error("Case {case_id} is {status} and cannot be archived; unpublish it first")]
    TerminalStateConflict { case_id: String, status: CaseStatus },

    /// The validation collaborator failed. Nothing was recorded.
    #[error("Validation unavailable: {0}")]
    ScorerUnavailable(String),

    /// A conditional update found the case in a different state than the snapshot.
    #[error("Case {case_id} was modified concurrently (expected {expected}); re-fetch and retry")]
    ConcurrentModification { case_id: String, expected: CaseStatus },

    /// A rating outside the configured scale.
    #[error("Rating {rating} is outside the allowed range {min}..={max}")]
    InvalidRating { rating: i64, min: u8, max: u8 },
}

impl WorkflowError {
    /// Stable error code for programmatic handling.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } | Self::ProjectNotFound { .. } => "NOT_FOUND",
            Self::WrongState { .. } => "WRONG_STATE",
            Self::MissingValidation { .. } => "MISSING_VALIDATION",
            Self::BelowThreshold { .. } => "BELOW_THRESHOLD",
            Self::MissingReason => "MISSING_REASON",
            Self::TerminalStateConflict { .. } => "TERMINAL_STATE_CONFLICT",
            Self::ScorerUnavailable(_) => "SCORER_UNAVAILABLE",
            Self::ConcurrentModification { .. } => "CONCURRENT_MODIFICATION",
            Self::InvalidRating { .. } => "INVALID_RATING",
        }
    }

    /// Whether the caller may safely retry the same request.
    ///
    /// The engine itself never retries.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ScorerUnavailable(_) | Self::ConcurrentModification { .. }
        )
    }

    /// Whether this is one of the guard failures (as opposed to lookup,
    /// collaborator or race errors).
    #[must_use]
    pub const fn is_guard_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingValidation { .. }
                | Self::BelowThreshold { .. }
                | Self::MissingReason
                | Self::TerminalStateConflict { .. }
        )
    }
}

fn join_states(states: &[CaseStatus]) -> String {
    states
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" or ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_state_names_expected_and_actual() {
        let err = WorkflowError::WrongState {
            transition: Transition::Archive,
            expected: vec![CaseStatus::Draft, CaseStatus::InReview, CaseStatus::Approved],
            actual: CaseStatus::Archived,
        };
        let msg = err.to_string();
        assert!(msg.contains("archive"), "{msg}");
        assert!(msg.contains("draft or in_review or approved"), "{msg}");
        assert!(msg.contains("archived"), "{msg}");
    }

    #[test]
    fn below_threshold_includes_threshold() {
        let err = WorkflowError::BelowThreshold {
            score: 70.5,
            threshold: 85.0,
        };
        assert!(err.to_string().contains("85"));
        assert!(err.to_string().contains("70.5"));
    }

    #[test]
    fn only_scorer_and_race_errors_are_retryable() {
        assert!(WorkflowError::ScorerUnavailable("timeout".into()).is_retryable());
        assert!(
            WorkflowError::ConcurrentModification {
                case_id: "cas-1".into(),
                expected: CaseStatus::InReview,
            }
            .is_retryable()
        );
        assert!(!WorkflowError::MissingReason.is_retryable());
        assert!(
            !WorkflowError::NotFound {
                case_id: "cas-1".into(),
                project_id: "prj-1".into(),
            }
            .is_retryable()
        );
    }

    #[test]
    fn error_codes() {
        assert_eq!(WorkflowError::MissingReason.code(), "MISSING_REASON");
        assert_eq!(
            WorkflowError::TerminalStateConflict {
                case_id: "cas-1".into(),
                status: CaseStatus::Published,
            }
            .code(),
            "TERMINAL_STATE_CONFLICT"
        );
        assert_eq!(
            WorkflowError::InvalidRating {
                rating: 9,
                min: 1,
                max: 5,
            }
            .code(),
            "INVALID_RATING"
        );
    }

    #[test]
    fn missing_project_shares_not_found_code() {
        let err = WorkflowError::ProjectNotFound {
            project_id: "prj-1".into(),
        };
        assert_eq!(err.code(), "NOT_FOUND");
        assert!(err.to_string().contains("prj-1"));
        assert!(!err.is_retryable());
        assert!(!err.is_guard_failure());
    }

    #[test]
    fn guard_failures_classified() {
        assert!(WorkflowError::MissingReason.is_guard_failure());
        assert!(
            WorkflowError::MissingValidation {
                case_id: "cas-1".into()
            }
            .is_guard_failure()
        );
        assert!(!WorkflowError::ScorerUnavailable(String::new()).is_guard_failure());
    }
}
