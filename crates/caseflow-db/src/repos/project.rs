//! Project repository: create, read, list, cascading delete.

use caseflow_core::entities::Project;
use caseflow_core::errors::WorkflowError;
use caseflow_core::ids::PREFIX_PROJECT;
use chrono::Utc;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::CaseService;

const SELECT_COLS: &str = "id, name, created_at";

fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
    })
}

/// Load a project on `conn`.
///
/// # Errors
///
/// `WorkflowError::ProjectNotFound` if no such project exists.
pub(crate) async fn select_project(
    conn: &libsql::Connection,
    id: &str,
) -> Result<Project, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM projects WHERE id = ?1"),
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => row_to_project(&row),
        None => Err(WorkflowError::ProjectNotFound {
            project_id: id.to_string(),
        }
        .into()),
    }
}

impl CaseService {
    pub async fn create_project(&self, name: &str) -> Result<Project, DatabaseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DatabaseError::InvalidState(
                "project name must not be empty".into(),
            ));
        }

        let _gate = self.conn_gate().await;
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_PROJECT).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO projects ({SELECT_COLS}) VALUES (?1, ?2, ?3)"),
                libsql::params![id.as_str(), name, now.to_rfc3339()],
            )
            .await?;

        tracing::info!(project_id = %id, "project created");
        Ok(Project {
            id,
            name: name.to_string(),
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// `WorkflowError::ProjectNotFound` if no such project exists.
    pub async fn get_project(&self, id: &str) -> Result<Project, DatabaseError> {
        let _gate = self.conn_gate().await;
        select_project(self.db().conn(), id).await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError> {
        let _gate = self.conn_gate().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects ORDER BY created_at, rowid"),
                (),
            )
            .await?;

        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    /// Delete a project together with its cases and their comments.
    ///
    /// # Errors
    ///
    /// `WorkflowError::ProjectNotFound` if no such project exists.
    pub async fn delete_project(&self, id: &str) -> Result<(), DatabaseError> {
        let _gate = self.conn_gate().await;
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM projects WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(WorkflowError::ProjectNotFound {
                project_id: id.to_string(),
            }
            .into());
        }
        tracing::info!(project_id = %id, "project deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{draft_case, test_service};
    use caseflow_core::ids::has_prefix;

    #[tokio::test]
    async fn create_project_roundtrip() {
        let svc = test_service().await;
        let project = svc.create_project("  Cardiology ").await.unwrap();
        assert!(has_prefix(&project.id, PREFIX_PROJECT));
        assert_eq!(project.name, "Cardiology");

        let fetched = svc.get_project(&project.id).await.unwrap();
        assert_eq!(fetched, project);
    }

    #[tokio::test]
    async fn blank_name_rejected() {
        let svc = test_service().await;
        assert!(matches!(
            svc.create_project("   ").await,
            Err(DatabaseError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn list_projects_in_creation_order() {
        let svc = test_service().await;
        svc.create_project("A").await.unwrap();
        svc.create_project("B").await.unwrap();
        let names: Vec<_> = svc
            .list_projects()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn delete_cascades_to_cases_and_comments() {
        let svc = test_service().await;
        let project = svc.create_project("Doomed").await.unwrap();
        let keep = svc.create_project("Kept").await.unwrap();
        let case = draft_case(&svc, &project.id).await;
        let kept_case = draft_case(&svc, &keep.id).await;
        svc.add_comment(&case.id, &project.id, "student", "useful")
            .await
            .unwrap();

        svc.delete_project(&project.id).await.unwrap();

        assert!(matches!(
            svc.get_project(&project.id).await,
            Err(DatabaseError::Workflow(WorkflowError::ProjectNotFound { .. }))
        ));
        assert!(svc.find_case_by_id(&case.id).await.unwrap().is_none());
        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM case_comments WHERE case_id = ?1", [case.id.as_str()])
            .await
            .unwrap();
        let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(count, 0);
        assert!(svc.find_case_by_id(&kept_case.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_missing_project() {
        let svc = test_service().await;
        let err = svc.delete_project("prj-00000000").await.unwrap_err();
        assert_eq!(err.as_workflow().map(WorkflowError::code), Some("NOT_FOUND"));
    }
}
