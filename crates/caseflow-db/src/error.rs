//! Database error types for caseflow-db.

use caseflow_core::errors::WorkflowError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A lifecycle guard, lookup or race failure.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB or a blank argument).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// The workflow error inside, if this is one.
    #[must_use]
    pub const fn as_workflow(&self) -> Option<&WorkflowError> {
        match self {
            Self::Workflow(err) => Some(err),
            _ => None,
        }
    }

    /// Whether retrying the same call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.as_workflow().is_some_and(WorkflowError::is_retryable)
    }
}
