//! Approval queue.

use caseflow_core::enums::CaseStatus;
use caseflow_core::queue::{QueueEntry, rank_queue};
use chrono::{DateTime, Utc};

use crate::error::DatabaseError;
use crate::service::CaseService;

impl CaseService {
    /// `in_review` cases of a project, highest review priority first.
    pub async fn approval_queue(
        &self,
        project_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<QueueEntry>, DatabaseError> {
        let cases = self.list_cases(project_id, Some(CaseStatus::InReview)).await?;
        Ok(rank_queue(&cases, now, self.config().review_time_limit_hours))
    }
}
