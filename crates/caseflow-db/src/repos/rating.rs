//! Rating aggregation.

use caseflow_core::errors::WorkflowError;
use caseflow_core::rating::{RatingSummary, fold_rating};
use chrono::Utc;

use crate::error::DatabaseError;
use crate::repos::case::select_case;
use crate::service::CaseService;

impl CaseService {
    /// Fold one integer rating into the case's running mean.
    ///
    /// The write is conditional on the `rating_count` that was read, so a
    /// concurrent fold can never be lost. Status is not touched.
    ///
    /// # Errors
    ///
    /// `InvalidRating` for ratings off the configured scale (checked before
    /// the lookup), `NotFound`, or `ConcurrentModification`.
    pub async fn record_rating(
        &self,
        case_id: &str,
        project_id: &str,
        rating: i64,
    ) -> Result<RatingSummary, DatabaseError> {
        let rating = self.config().rating_scale().check(rating)?;

        let _gate = self.conn_gate().await;
        let case = select_case(self.db().conn(), case_id, project_id).await?;
        let summary = fold_rating(case.rating, case.rating_count, rating);

        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE cases SET rating = ?1, rating_count = ?2, updated_at = ?3
                 WHERE id = ?4 AND project_id = ?5 AND rating_count = ?6",
                libsql::params![
                    summary.rating,
                    i64::from(summary.rating_count),
                    Utc::now().to_rfc3339(),
                    case_id,
                    project_id,
                    i64::from(case.rating_count)
                ],
            )
            .await?;
        if affected == 0 {
            tracing::warn!(case_id, "rating fold lost a race");
            return Err(WorkflowError::ConcurrentModification {
                case_id: case_id.to_string(),
                expected: case.status,
            }
            .into());
        }

        tracing::debug!(case_id, rating, mean = summary.rating, count = summary.rating_count, "rating recorded");
        Ok(summary)
    }
}
