//! Validation scoring contract and the score gates.
//!
//! How a score is computed is not this crate's business: a [`ValidationScorer`]
//! hands back `(score, is_valid, report)` and the workflow only ever reads the
//! recorded score.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::entities::Case;
use crate::errors::WorkflowError;

/// Default score a case needs before it can be submitted for review.
pub const DEFAULT_REQUIRED_SCORE: f64 = 85.0;

// ---------------------------------------------------------------------------
// Scorer contract
// ---------------------------------------------------------------------------

/// Failure reported by a scorer implementation.
#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("scorer failed: {0}")]
    Failed(String),

    #[error("scorer timed out")]
    Timeout,

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<ScorerError> for WorkflowError {
    fn from(err: ScorerError) -> Self {
        Self::ScorerUnavailable(err.to_string())
    }
}

/// Result of one scorer run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationOutcome {
    pub score: f64,
    pub is_valid: bool,
    pub report: Value,
}

impl ValidationOutcome {
    /// Reject scores a well-behaved scorer never produces.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::ScorerUnavailable` for non-finite scores or
    /// scores outside `[0, 100]`.
    pub fn checked(self) -> Result<Self, WorkflowError> {
        if self.score.is_finite() && (0.0..=100.0).contains(&self.score) {
            Ok(self)
        } else {
            Err(WorkflowError::ScorerUnavailable(format!(
                "scorer returned out-of-range score {}",
                self.score
            )))
        }
    }
}

/// Computes a validation score for case content.
pub trait ValidationScorer: Send + Sync {
    /// Score `content`.
    ///
    /// # Errors
    ///
    /// Any failure; the caller records nothing.
    fn validate(&self, content: &Value) -> Result<ValidationOutcome, ScorerError>;
}

impl<F> ValidationScorer for F
where
    F: Fn(&Value) -> Result<ValidationOutcome, ScorerError> + Send + Sync,
{
    fn validate(&self, content: &Value) -> Result<ValidationOutcome, ScorerError> {
        self(content)
    }
}

// ---------------------------------------------------------------------------
// Gates
// ---------------------------------------------------------------------------

/// Score thresholds applied by the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationGate {
    /// Minimum recorded score for `draft -> in_review`.
    pub required_score: f64,
    /// Optional minimum recorded score for `approved -> published`.
    pub publication_score: Option<f64>,
}

impl Default for ValidationGate {
    fn default() -> Self {
        Self {
            required_score: DEFAULT_REQUIRED_SCORE,
            publication_score: None,
        }
    }
}

impl ValidationGate {
    /// Submission gate: a score must be recorded and reach the threshold.
    ///
    /// # Errors
    ///
    /// `MissingValidation` when no score is recorded, `BelowThreshold` when
    /// the score is under `required_score`.
    pub fn check_submission(&self, case: &Case) -> Result<(), WorkflowError> {
        let score = case
            .validation_score
            .ok_or_else(|| WorkflowError::MissingValidation {
                case_id: case.id.clone(),
            })?;
        if score < self.required_score {
            return Err(WorkflowError::BelowThreshold {
                score,
                threshold: self.required_score,
            });
        }
        Ok(())
    }

    /// Publication gate; passes when no publication threshold is configured.
    ///
    /// # Errors
    ///
    /// Same as [`check_submission`](Self::check_submission), against
    /// `publication_score`.
    pub fn check_publication(&self, case: &Case) -> Result<(), WorkflowError> {
        let Some(threshold) = self.publication_score else {
            return Ok(());
        };
        let score = case
            .validation_score
            .ok_or_else(|| WorkflowError::MissingValidation {
                case_id: case.id.clone(),
            })?;
        if score < threshold {
            return Err(WorkflowError::BelowThreshold { score, threshold });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Recording policy
// ---------------------------------------------------------------------------

/// Whether a scorer run overwrites an earlier recorded run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRecordPolicy {
    /// Record only the first run; later runs are reported but not stored.
    #[default]
    FirstWriteWins,
    /// Record every run.
    AlwaysOverwrite,
}

impl ValidationRecordPolicy {
    #[must_use]
    pub const fn should_record(self, case: &Case) -> bool {
        match self {
            Self::FirstWriteWins => !case.has_recorded_validation(),
            Self::AlwaysOverwrite => true,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstWriteWins => "first_write_wins",
            Self::AlwaysOverwrite => "always_overwrite",
        }
    }
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

/// Coarse quality band of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Acceptable,
    NeedsWork,
    Insufficient,
}

impl ScoreBand {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Self::Excellent,
            s if s >= 75.0 => Self::Good,
            s if s >= 60.0 => Self::Acceptable,
            s if s >= 45.0 => Self::NeedsWork,
            _ => Self::Insufficient,
        }
    }
}

/// What `validate` returns to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    pub case_id: String,
    pub project_id: String,
    pub score: f64,
    pub is_valid: bool,
    pub band: ScoreBand,
    /// Whether this run was persisted under the active policy.
    pub recorded: bool,
    pub report: Value,
}

impl ValidationReport {
    #[must_use]
    pub fn new(case: &Case, outcome: ValidationOutcome, recorded: bool) -> Self {
        Self {
            case_id: case.id.clone(),
            project_id: case.project_id.clone(),
            score: outcome.score,
            is_valid: outcome.is_valid,
            band: ScoreBand::from_score(outcome.score),
            recorded,
            report: outcome.report,
        }
    }
}
