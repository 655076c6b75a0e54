//! Service layer: the database handle plus the workflow configuration.
//!
//! `CaseService` wraps `CaseDb` and the immutable `WorkflowConfig` loaded at
//! startup. All repo methods are implemented as `impl CaseService`.

use caseflow_config::{CaseflowConfig, WorkflowConfig};
use tokio::sync::{Mutex, MutexGuard};

use crate::CaseDb;
use crate::error::DatabaseError;

/// Runs case operations against one database.
///
/// All repo methods share one libSQL connection, and a transaction opened on
/// it captures every statement issued on that connection until it ends. The
/// connection gate therefore covers every public method, reads included:
/// 1. Acquire the connection gate
/// 2. Read the snapshot
/// 3. Evaluate guards and build the plan (pure, in `caseflow-core`)
/// 4. Begin a transaction, apply the plan with an `UPDATE` conditional on the
///    snapshot, append the audit comment, commit
///
/// Inside a gated section repos call the connection-level helpers in
/// [`crate::repos`] directly, never another public method. The conditional
/// `UPDATE` catches writers outside the gate (another process on the same
/// file, or a caller committing a stale plan).
pub struct CaseService {
    db: CaseDb,
    config: WorkflowConfig,
    conn_gate: Mutex<()>,
}

impl CaseService {
    /// Open a local database and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, config: WorkflowConfig) -> Result<Self, DatabaseError> {
        let db = CaseDb::open_local(db_path).await?;
        Ok(Self::from_db(db, config))
    }

    /// Open the database named by a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn from_config(config: &CaseflowConfig) -> Result<Self, DatabaseError> {
        Self::new_local(&config.database.path, config.workflow).await
    }

    #[must_use]
    pub fn from_db(db: CaseDb, config: WorkflowConfig) -> Self {
        Self {
            db,
            config,
            conn_gate: Mutex::new(()),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &CaseDb {
        &self.db
    }

    /// The workflow configuration this service was built with.
    #[must_use]
    pub const fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Wait for exclusive use of the connection. Released when the guard
    /// drops.
    pub(crate) async fn conn_gate(&self) -> MutexGuard<'_, ()> {
        self.conn_gate.lock().await
    }
}
