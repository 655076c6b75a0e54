//! Workflow gate and rating configuration.

use caseflow_core::queue::DEFAULT_REVIEW_TIME_LIMIT_HOURS;
use caseflow_core::rating::RatingScale;
use caseflow_core::validation::{DEFAULT_REQUIRED_SCORE, ValidationGate, ValidationRecordPolicy};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_required_validation_score() -> f64 {
    DEFAULT_REQUIRED_SCORE
}

const fn default_rating_min() -> u8 {
    1
}

const fn default_rating_max() -> u8 {
    5
}

const fn default_review_time_limit_hours() -> u32 {
    DEFAULT_REVIEW_TIME_LIMIT_HOURS
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Minimum recorded validation score to submit a case for review.
    #[serde(default = "default_required_validation_score")]
    pub required_validation_score: f64,

    /// Minimum recorded score to publish. Unset disables the check.
    #[serde(default)]
    pub publication_score: Option<f64>,

    #[serde(default = "default_rating_min")]
    pub rating_min: u8,

    #[serde(default = "default_rating_max")]
    pub rating_max: u8,

    /// Whether later validation runs overwrite the first recorded one.
    #[serde(default)]
    pub validation_policy: ValidationRecordPolicy,

    /// Hours a case may wait in review before the queue flags it overdue.
    #[serde(default = "default_review_time_limit_hours")]
    pub review_time_limit_hours: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            required_validation_score: default_required_validation_score(),
            publication_score: None,
            rating_min: default_rating_min(),
            rating_max: default_rating_max(),
            validation_policy: ValidationRecordPolicy::default(),
            review_time_limit_hours: default_review_time_limit_hours(),
        }
    }
}

impl WorkflowConfig {
    #[must_use]
    pub const fn gate(&self) -> ValidationGate {
        ValidationGate {
            required_score: self.required_validation_score,
            publication_score: self.publication_score,
        }
    }

    #[must_use]
    pub const fn rating_scale(&self) -> RatingScale {
        RatingScale {
            min: self.rating_min,
            max: self.rating_max,
        }
    }

    /// Check thresholds lie in `[0, 100]` and the rating range is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_score("workflow.required_validation_score", self.required_validation_score)?;
        if let Some(score) = self.publication_score {
            check_score("workflow.publication_score", score)?;
        }
        if self.rating_min == 0 {
            return Err(ConfigError::invalid(
                "workflow.rating_min",
                "must be at least 1",
            ));
        }
        if self.rating_min > self.rating_max {
            return Err(ConfigError::invalid(
                "workflow.rating_max",
                format!(
                    "must not be below rating_min ({} > {})",
                    self.rating_min, self.rating_max
                ),
            ));
        }
        if self.review_time_limit_hours == 0 {
            return Err(ConfigError::invalid(
                "workflow.review_time_limit_hours",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn check_score(field: &str, score: f64) -> Result<(), ConfigError> {
    if score.is_finite() && (0.0..=100.0).contains(&score) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{score} is outside 0..=100")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = WorkflowConfig::default();
        assert!((config.required_validation_score - 85.0).abs() < f64::EPSILON);
        assert!(config.publication_score.is_none());
        assert_eq!(config.rating_scale(), RatingScale { min: 1, max: 5 });
        assert_eq!(config.validation_policy, ValidationRecordPolicy::FirstWriteWins);
        assert_eq!(config.review_time_limit_hours, 72);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn gate_carries_thresholds() {
        let config = WorkflowConfig {
            required_validation_score: 70.0,
            publication_score: Some(90.0),
            ..WorkflowConfig::default()
        };
        let gate = config.gate();
        assert!((gate.required_score - 70.0).abs() < f64::EPSILON);
        assert_eq!(gate.publication_score, Some(90.0));
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let config = WorkflowConfig {
            required_validation_score: 120.0,
            ..WorkflowConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("required_validation_score"), "{err}");
    }

    #[test]
    fn rejects_inverted_rating_range() {
        let config = WorkflowConfig {
            rating_min: 4,
            rating_max: 2,
            ..WorkflowConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn rejects_zero_review_time_limit() {
        let config = WorkflowConfig {
            review_time_limit_hours: 0,
            ..WorkflowConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("review_time_limit_hours"), "{err}");
    }
}
