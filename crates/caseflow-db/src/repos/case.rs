//! Case repository: create, lookup, listing, and the conditional update every
//! workflow commit goes through.

use caseflow_core::entities::Case;
use caseflow_core::enums::{CaseComplexity, CaseStatus};
use caseflow_core::errors::WorkflowError;
use caseflow_core::ids::PREFIX_CASE;
use chrono::Utc;

use crate::error::DatabaseError;
use crate::helpers::{
    get_count, get_opt_datetime, get_opt_string, parse_datetime, parse_enum, parse_optional_json,
};
use crate::repos::project::select_project;
use crate::service::CaseService;
use crate::updates::case::CaseUpdate;

pub(crate) const SELECT_COLS: &str = "id, project_id, title, complexity, status, \
     validation_score, validated, validation_results, last_validated_at, \
     rating, rating_count, \
     submitted_for_review_by, submitted_for_review_at, reviewed_by, reviewed_at, \
     published_at, archived_by, archived_at, created_at, updated_at";

pub(crate) fn row_to_case(row: &libsql::Row) -> Result<Case, DatabaseError> {
    Ok(Case {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        complexity: parse_enum(&row.get::<String>(3)?)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        validation_score: row.get::<Option<f64>>(5)?,
        validated: row.get::<i64>(6)? != 0,
        validation_results: parse_optional_json(get_opt_string(row, 7)?.as_deref())?,
        last_validated_at: get_opt_datetime(row, 8)?,
        rating: row.get::<Option<f64>>(9)?,
        rating_count: get_count(row, 10)?,
        submitted_for_review_by: get_opt_string(row, 11)?,
        submitted_for_review_at: get_opt_datetime(row, 12)?,
        reviewed_by: get_opt_string(row, 13)?,
        reviewed_at: get_opt_datetime(row, 14)?,
        published_at: get_opt_datetime(row, 15)?,
        archived_by: get_opt_string(row, 16)?,
        archived_at: get_opt_datetime(row, 17)?,
        created_at: parse_datetime(&row.get::<String>(18)?)?,
        updated_at: parse_datetime(&row.get::<String>(19)?)?,
    })
}

/// Apply `update` only if the case still has `expected` status.
///
/// Returns the number of rows changed: `0` means the case is gone, belongs to
/// another project, or moved on since the snapshot was read.
pub(crate) async fn update_case_where(
    conn: &libsql::Connection,
    case_id: &str,
    project_id: &str,
    expected: CaseStatus,
    update: &CaseUpdate,
) -> Result<u64, DatabaseError> {
    let (sets, mut params) = update.set_clauses();
    if sets.is_empty() {
        return Ok(0);
    }
    let idx = params.len();
    params.push(case_id.into());
    params.push(project_id.into());
    params.push(expected.as_str().into());
    let sql = format!(
        "UPDATE cases SET {} WHERE id = ?{} AND project_id = ?{} AND status = ?{}",
        sets.join(", "),
        idx + 1,
        idx + 2,
        idx + 3,
    );
    Ok(conn.execute(&sql, libsql::params_from_iter(params)).await?)
}

/// Load a case scoped to its project on `conn`.
///
/// # Errors
///
/// `WorkflowError::NotFound` when the case does not exist or belongs to a
/// different project.
pub(crate) async fn select_case(
    conn: &libsql::Connection,
    case_id: &str,
    project_id: &str,
) -> Result<Case, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM cases WHERE id = ?1 AND project_id = ?2"),
            [case_id, project_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => row_to_case(&row),
        None => Err(WorkflowError::NotFound {
            case_id: case_id.to_string(),
            project_id: project_id.to_string(),
        }
        .into()),
    }
}

/// Cases of a project on `conn`, oldest first, optionally filtered by status.
pub(crate) async fn select_cases(
    conn: &libsql::Connection,
    project_id: &str,
    status: Option<CaseStatus>,
) -> Result<Vec<Case>, DatabaseError> {
    let mut rows = match status {
        Some(status) => {
            conn.query(
                &format!(
                    "SELECT {SELECT_COLS} FROM cases WHERE project_id = ?1 AND status = ?2 \
                     ORDER BY created_at, rowid"
                ),
                [project_id, status.as_str()],
            )
            .await?
        }
        None => {
            conn.query(
                &format!(
                    "SELECT {SELECT_COLS} FROM cases WHERE project_id = ?1 \
                     ORDER BY created_at, rowid"
                ),
                [project_id],
            )
            .await?
        }
    };

    let mut cases = Vec::new();
    while let Some(row) = rows.next().await? {
        cases.push(row_to_case(&row)?);
    }
    Ok(cases)
}

impl CaseService {
    /// Create a draft case.
    ///
    /// # Errors
    ///
    /// `DatabaseError::InvalidState` for a blank title,
    /// `WorkflowError::ProjectNotFound` for an unknown project.
    pub async fn create_case(
        &self,
        project_id: &str,
        title: &str,
        complexity: CaseComplexity,
    ) -> Result<Case, DatabaseError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DatabaseError::InvalidState(
                "case title must not be empty".into(),
            ));
        }

        let _gate = self.conn_gate().await;
        select_project(self.db().conn(), project_id).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_CASE).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO cases (id, project_id, title, complexity, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    id.as_str(),
                    project_id,
                    title,
                    complexity.as_str(),
                    CaseStatus::Draft.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::info!(case_id = %id, project_id, "case created");
        Ok(Case {
            id,
            project_id: project_id.to_string(),
            title: title.to_string(),
            complexity,
            status: CaseStatus::Draft,
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
            created_at: now,
            updated_at: now,
        })
    }

    /// Look up a case by id alone.
    pub async fn find_case_by_id(&self, case_id: &str) -> Result<Option<Case>, DatabaseError> {
        let _gate = self.conn_gate().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM cases WHERE id = ?1"),
                [case_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_case(&row)?)),
            None => Ok(None),
        }
    }

    /// Look up a case scoped to its project.
    ///
    /// # Errors
    ///
    /// `WorkflowError::NotFound` when the case does not exist or belongs to a
    /// different project.
    pub async fn find_case_by_id_and_project(
        &self,
        case_id: &str,
        project_id: &str,
    ) -> Result<Case, DatabaseError> {
        let _gate = self.conn_gate().await;
        select_case(self.db().conn(), case_id, project_id).await
    }

    /// Cases of a project, oldest first, optionally filtered by status.
    pub async fn list_cases(
        &self,
        project_id: &str,
        status: Option<CaseStatus>,
    ) -> Result<Vec<Case>, DatabaseError> {
        let _gate = self.conn_gate().await;
        select_cases(self.db().conn(), project_id, status).await
    }

    /// Atomically write several fields, conditional on the case still being
    /// in `expected_status`.
    ///
    /// # Errors
    ///
    /// `WorkflowError::ConcurrentModification` when no row matched.
    pub async fn update_case_fields(
        &self,
        case_id: &str,
        project_id: &str,
        expected_status: CaseStatus,
        update: &CaseUpdate,
    ) -> Result<(), DatabaseError> {
        if update.is_empty() {
            return Ok(());
        }
        let _gate = self.conn_gate().await;
        let affected =
            update_case_where(self.db().conn(), case_id, project_id, expected_status, update)
                .await?;
        if affected == 0 {
            tracing::warn!(case_id, expected = %expected_status, "conditional case update matched no row");
            return Err(WorkflowError::ConcurrentModification {
                case_id: case_id.to_string(),
                expected: expected_status,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{draft_case, force_status, test_project, test_service};
    use crate::updates::case::CaseUpdateBuilder;
    use caseflow_core::ids::has_prefix;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_case_roundtrip() {
        let svc = test_service().await;
        let project = test_project(&svc).await;
        let case = svc
            .create_case(&project, "Febrile infant", CaseComplexity::Advanced)
            .await
            .unwrap();
        assert!(has_prefix(&case.id, PREFIX_CASE));
        assert_eq!(case.status, CaseStatus::Draft);
        assert!(case.validation_score.is_none());
        assert_eq!(case.rating_count, 0);

        let fetched = svc.find_case_by_id_and_project(&case.id, &project).await.unwrap();
        assert_eq!(fetched, case);
    }

    #[tokio::test]
    async fn create_case_in_missing_project() {
        let svc = test_service().await;
        let result = svc
            .create_case("prj-00000000", "Orphan", CaseComplexity::Basic)
            .await;
        let err = result.unwrap_err();
        assert!(matches!(
            err.as_workflow(),
            Some(WorkflowError::ProjectNotFound { project_id }) if project_id == "prj-00000000"
        ));
    }

    #[tokio::test]
    async fn case_from_other_project_is_not_found() {
        let svc = test_service().await;
        let a = test_project(&svc).await;
        let b = test_project(&svc).await;
        let case = draft_case(&svc, &a).await;

        let err = svc.find_case_by_id_and_project(&case.id, &b).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Workflow(WorkflowError::NotFound { .. })
        ));
        assert!(svc.find_case_by_id(&case.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn list_cases_filters_by_status() {
        let svc = test_service().await;
        let project = test_project(&svc).await;
        let a = draft_case(&svc, &project).await;
        let b = draft_case(&svc, &project).await;
        force_status(&svc, &b.id, CaseStatus::Approved).await;

        assert_eq!(svc.list_cases(&project, None).await.unwrap().len(), 2);
        let drafts = svc.list_cases(&project, Some(CaseStatus::Draft)).await.unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].id, a.id);
    }

    #[tokio::test]
    async fn update_fields_conditional_on_status() {
        let svc = test_service().await;
        let project = test_project(&svc).await;
        let case = draft_case(&svc, &project).await;
        let update = CaseUpdateBuilder::new()
            .status(CaseStatus::Archived)
            .archived("ops", Utc::now())
            .build();

        let err = svc
            .update_case_fields(&case.id, &project, CaseStatus::InReview, &update)
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        let unchanged = svc.find_case_by_id_and_project(&case.id, &project).await.unwrap();
        assert_eq!(unchanged.status, CaseStatus::Draft);

        svc.update_case_fields(&case.id, &project, CaseStatus::Draft, &update)
            .await
            .unwrap();
        let archived = svc.find_case_by_id_and_project(&case.id, &project).await.unwrap();
        assert_eq!(archived.status, CaseStatus::Archived);
        assert_eq!(archived.archived_by.as_deref(), Some("ops"));
    }
}
