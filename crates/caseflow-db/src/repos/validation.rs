//! Validation runs: call the scorer, record the result under the configured
//! policy.

use caseflow_core::errors::WorkflowError;
use caseflow_core::validation::{ValidationOutcome, ValidationReport, ValidationScorer};
use chrono::Utc;

use crate::error::DatabaseError;
use crate::repos::case::{select_case, update_case_where};
use crate::service::CaseService;
use crate::updates::case::CaseUpdate;

impl CaseService {
    /// Score `content` and record the result if the policy allows it.
    ///
    /// The scorer runs outside the connection gate. The record decision is made on
    /// a fresh snapshot taken under the gate. Status never changes.
    ///
    /// # Errors
    ///
    /// `NotFound` before the scorer is called; `ScorerUnavailable` when the
    /// scorer fails or returns an out-of-range score, in which case nothing
    /// is written.
    pub async fn validate<S>(
        &self,
        case_id: &str,
        project_id: &str,
        content: &serde_json::Value,
        scorer: &S,
    ) -> Result<ValidationReport, DatabaseError>
    where
        S: ValidationScorer + ?Sized,
    {
        self.find_case_by_id_and_project(case_id, project_id).await?;

        let outcome = scorer
            .validate(content)
            .map_err(WorkflowError::from)
            .and_then(ValidationOutcome::checked)
            .inspect_err(|err| tracing::warn!(case_id, %err, "validation scorer failed"))?;

        let _gate = self.conn_gate().await;
        let case = select_case(self.db().conn(), case_id, project_id).await?;
        let policy = self.config().validation_policy;
        let recorded = policy.should_record(&case);

        if recorded {
            let update = CaseUpdate::from_validation(&outcome, Utc::now());
            let affected =
                update_case_where(self.db().conn(), case_id, project_id, case.status, &update)
                    .await?;
            if affected == 0 {
                return Err(WorkflowError::ConcurrentModification {
                    case_id: case_id.to_string(),
                    expected: case.status,
                }
                .into());
            }
            tracing::info!(case_id, score = outcome.score, is_valid = outcome.is_valid, "validation recorded");
        } else {
            tracing::debug!(case_id, policy = policy.as_str(), "validation not recorded");
        }

        Ok(ValidationReport::new(&case, outcome, recorded))
    }
}
