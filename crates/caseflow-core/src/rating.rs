//! Running-mean rating aggregation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::WorkflowError;

/// Inclusive integer range a rating must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RatingScale {
    pub min: u8,
    pub max: u8,
}

impl Default for RatingScale {
    fn default() -> Self {
        Self { min: 1, max: 5 }
    }
}

impl RatingScale {
    /// Accept `rating` if it lies on the scale.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidRating` when out of range.
    pub fn check(&self, rating: i64) -> Result<u8, WorkflowError> {
        u8::try_from(rating)
            .ok()
            .filter(|r| (self.min..=self.max).contains(r))
            .ok_or(WorkflowError::InvalidRating {
                rating,
                min: self.min,
                max: self.max,
            })
    }
}

/// Aggregated rating of a case after a fold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RatingSummary {
    pub rating: f64,
    pub rating_count: u32,
}

/// Fold one rating into the running mean.
///
/// `new = (old * count + r) / (count + 1)`. With no prior ratings the old mean
/// counts as 0, so the first rating becomes the mean exactly.
#[must_use]
pub fn fold_rating(current: Option<f64>, count: u32, rating: u8) -> RatingSummary {
    let old_mean = if count == 0 { 0.0 } else { current.unwrap_or(0.0) };
    let new_count = count + 1;
    RatingSummary {
        rating: old_mean.mul_add(f64::from(count), f64::from(rating)) / f64::from(new_count),
        rating_count: new_count,
    }
}
