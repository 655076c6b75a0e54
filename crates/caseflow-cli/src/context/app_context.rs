use std::path::Path;

use anyhow::Context;
use caseflow_config::CaseflowConfig;
use caseflow_db::service::CaseService;

use crate::cli::GlobalFlags;

/// Shared resources initialized once at startup.
pub struct AppContext {
    pub service: CaseService,
    pub config: CaseflowConfig,
}

impl AppContext {
    /// Load configuration, apply the `--db` override and open the database.
    pub async fn init(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let mut config =
            CaseflowConfig::load_with_dotenv().context("failed to load configuration")?;
        if let Some(path) = &flags.db {
            config.database.path.clone_from(path);
        }

        if !config.database.is_in_memory() {
            if let Some(parent) = Path::new(&config.database.path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create database directory {}", parent.display())
                    })?;
                }
            }
        }

        tracing::debug!(path = %config.database.path, "opening case database");
        let service = CaseService::from_config(&config)
            .await
            .with_context(|| format!("failed to open database {}", config.database.path))?;
        Ok(Self { service, config })
    }
}
