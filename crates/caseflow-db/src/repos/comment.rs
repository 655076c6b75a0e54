//! Case comment repository: the append-only audit trail.

use caseflow_core::audit::AuditComment;
use caseflow_core::entities::CaseComment;
use caseflow_core::ids::PREFIX_COMMENT;
use chrono::{DateTime, Utc};

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum};
use crate::repos::case::select_case;
use crate::service::CaseService;

const SELECT_COLS: &str = "id, case_id, author, kind, content, is_review, created_at";

fn row_to_comment(row: &libsql::Row) -> Result<CaseComment, DatabaseError> {
    Ok(CaseComment {
        id: row.get(0)?,
        case_id: row.get(1)?,
        author: row.get(2)?,
        kind: parse_enum(&row.get::<String>(3)?)?,
        content: row.get(4)?,
        is_review: row.get::<i64>(5)? != 0,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Insert a rendered comment on `conn`, which may be an open transaction.
pub(crate) async fn insert_comment(
    conn: &libsql::Connection,
    id: &str,
    case_id: &str,
    comment: &AuditComment,
    at: DateTime<Utc>,
) -> Result<CaseComment, DatabaseError> {
    let stored = CaseComment {
        id: id.to_string(),
        case_id: case_id.to_string(),
        author: comment.author.clone(),
        kind: comment.kind,
        content: comment.render(),
        is_review: comment.is_review(),
        created_at: at,
    };
    conn.execute(
        &format!("INSERT INTO case_comments ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
        libsql::params![
            stored.id.as_str(),
            stored.case_id.as_str(),
            stored.author.as_str(),
            stored.kind.as_str(),
            stored.content.as_str(),
            i64::from(stored.is_review),
            at.to_rfc3339()
        ],
    )
    .await?;
    Ok(stored)
}

impl CaseService {
    /// Append a comment to a case's trail.
    ///
    /// Workflow transitions append inside their own transaction; this is the
    /// standalone entry point.
    ///
    /// # Errors
    ///
    /// `WorkflowError::NotFound` if the case is not in the project.
    pub async fn append_comment(
        &self,
        case_id: &str,
        project_id: &str,
        comment: &AuditComment,
    ) -> Result<CaseComment, DatabaseError> {
        let _gate = self.conn_gate().await;
        self.append_comment_locked(case_id, project_id, comment).await
    }

    /// Add a free-form discussion comment to a case.
    ///
    /// # Errors
    ///
    /// `WorkflowError::NotFound` if the case is not in the project,
    /// `DatabaseError::InvalidState` for blank text.
    pub async fn add_comment(
        &self,
        case_id: &str,
        project_id: &str,
        author: &str,
        text: &str,
    ) -> Result<CaseComment, DatabaseError> {
        if text.trim().is_empty() {
            return Err(DatabaseError::InvalidState(
                "comment text must not be empty".into(),
            ));
        }
        let _gate = self.conn_gate().await;
        let comment = self
            .append_comment_locked(case_id, project_id, &AuditComment::discussion(author, text))
            .await?;
        tracing::debug!(case_id, comment_id = %comment.id, "discussion comment added");
        Ok(comment)
    }

    /// Every comment on a case, oldest first.
    pub async fn list_comments(
        &self,
        case_id: &str,
        project_id: &str,
    ) -> Result<Vec<CaseComment>, DatabaseError> {
        let _gate = self.conn_gate().await;
        let conn = self.db().conn();
        select_case(conn, case_id, project_id).await?;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM case_comments WHERE case_id = ?1 \
                     ORDER BY created_at, rowid"
                ),
                [case_id],
            )
            .await?;

        let mut comments = Vec::new();
        while let Some(row) = rows.next().await? {
            comments.push(row_to_comment(&row)?);
        }
        Ok(comments)
    }

    /// Caller holds the connection gate.
    async fn append_comment_locked(
        &self,
        case_id: &str,
        project_id: &str,
        comment: &AuditComment,
    ) -> Result<CaseComment, DatabaseError> {
        select_case(self.db().conn(), case_id, project_id).await?;
        let id = self.db().generate_id(PREFIX_COMMENT).await?;
        insert_comment(self.db().conn(), &id, case_id, comment, Utc::now()).await
    }
}
