//! Lifecycle transitions: read the snapshot, plan, commit atomically.

use caseflow_core::entities::Case;
use caseflow_core::errors::WorkflowError;
use caseflow_core::ids::PREFIX_COMMENT;
use caseflow_core::workflow::{
    TransitionPlan, TransitionRequest, WorkflowStatus, plan_transition, workflow_status,
};
use chrono::Utc;

use crate::error::DatabaseError;
use crate::repos::case::{select_case, update_case_where};
use crate::repos::comment::insert_comment;
use crate::service::CaseService;
use crate::updates::case::CaseUpdate;

impl CaseService {
    /// `draft -> in_review`. Requires a recorded score at or above the
    /// configured threshold. A comment is stored only if one is given.
    pub async fn submit_for_review(
        &self,
        case_id: &str,
        project_id: &str,
        actor: &str,
        comment: Option<&str>,
    ) -> Result<Case, DatabaseError> {
        self.transition(
            case_id,
            project_id,
            TransitionRequest::SubmitForReview {
                actor: actor.to_string(),
                comment: comment.map(String::from),
            },
        )
        .await
    }

    /// `in_review -> approved`, stamping the reviewer.
    pub async fn approve(
        &self,
        case_id: &str,
        project_id: &str,
        actor: &str,
        comment: Option<&str>,
    ) -> Result<Case, DatabaseError> {
        self.transition(
            case_id,
            project_id,
            TransitionRequest::Approve {
                actor: actor.to_string(),
                comment: comment.map(String::from),
            },
        )
        .await
    }

    /// `in_review -> draft` with a mandatory reason. Reviewer stamps of
    /// earlier rounds are kept.
    pub async fn reject(
        &self,
        case_id: &str,
        project_id: &str,
        actor: &str,
        reason: &str,
        suggestions: &[String],
    ) -> Result<Case, DatabaseError> {
        self.transition(
            case_id,
            project_id,
            TransitionRequest::Reject {
                actor: actor.to_string(),
                reason: reason.to_string(),
                suggestions: suggestions.to_vec(),
            },
        )
        .await
    }

    /// `approved -> published`.
    pub async fn publish(&self, case_id: &str, project_id: &str) -> Result<Case, DatabaseError> {
        self.transition(case_id, project_id, TransitionRequest::Publish)
            .await
    }

    /// `draft | in_review | approved -> archived`. Published cases refuse.
    pub async fn archive(
        &self,
        case_id: &str,
        project_id: &str,
        actor: &str,
        reason: Option<&str>,
    ) -> Result<Case, DatabaseError> {
        self.transition(
            case_id,
            project_id,
            TransitionRequest::Archive {
                actor: actor.to_string(),
                reason: reason.map(String::from),
            },
        )
        .await
    }

    /// Run any transition request end to end.
    ///
    /// # Errors
    ///
    /// Guard failures and `NotFound` as `DatabaseError::Workflow`; storage
    /// failures as the other variants. On any error nothing is written.
    pub async fn transition(
        &self,
        case_id: &str,
        project_id: &str,
        request: TransitionRequest,
    ) -> Result<Case, DatabaseError> {
        request.precheck()?;

        let _gate = self.conn_gate().await;
        let case = select_case(self.db().conn(), case_id, project_id).await?;
        let plan = plan_transition(&case, &request, &self.config().gate(), Utc::now())
            .inspect_err(|err| {
                tracing::debug!(case_id, transition = %request.transition(), %err, "guard refused transition");
            })?;
        tracing::debug!(case_id, from = %plan.from, to = %plan.to, "transition planned");

        self.commit_plan_locked(&plan).await?;
        Ok(plan.apply_to(&case))
    }

    /// Commit a plan computed elsewhere.
    ///
    /// The update is conditional on `plan.from`; a plan built from a snapshot
    /// that has since moved on fails with `ConcurrentModification` and writes
    /// nothing.
    pub async fn commit_plan(&self, plan: &TransitionPlan) -> Result<Case, DatabaseError> {
        let _gate = self.conn_gate().await;
        self.commit_plan_locked(plan).await?;
        select_case(self.db().conn(), &plan.case_id, &plan.project_id).await
    }

    /// Current status, available moves and review stamps of a case.
    pub async fn workflow_status(
        &self,
        case_id: &str,
        project_id: &str,
    ) -> Result<WorkflowStatus, DatabaseError> {
        let _gate = self.conn_gate().await;
        let case = select_case(self.db().conn(), case_id, project_id).await?;
        Ok(workflow_status(&case, &self.config().gate()))
    }

    /// Status update and audit comment in one transaction. Caller holds the
    /// connection gate.
    async fn commit_plan_locked(&self, plan: &TransitionPlan) -> Result<(), DatabaseError> {
        let update = CaseUpdate::from_plan(plan);
        let tx = self.db().conn().transaction().await?;

        let written: Result<(), DatabaseError> = async {
            let affected =
                update_case_where(&tx, &plan.case_id, &plan.project_id, plan.from, &update)
                    .await?;
            if affected == 0 {
                return Err(WorkflowError::ConcurrentModification {
                    case_id: plan.case_id.clone(),
                    expected: plan.from,
                }
                .into());
            }
            if let Some(comment) = &plan.comment {
                let id = self.db().generate_id(PREFIX_COMMENT).await?;
                insert_comment(&tx, &id, &plan.case_id, comment, plan.at).await?;
            }
            Ok(())
        }
        .await;

        match written {
            Ok(()) => {
                tx.commit().await?;
                tracing::info!(
                    case_id = %plan.case_id,
                    transition = %plan.transition,
                    from = %plan.from,
                    to = %plan.to,
                    "transition committed"
                );
                Ok(())
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(
                        case_id = %plan.case_id,
                        %err,
                        %rollback_err,
                        "transition rollback failed"
                    );
                } else {
                    tracing::warn!(case_id = %plan.case_id, transition = %plan.transition, %err, "transition rolled back");
                }
                Err(err)
            }
        }
    }
}
