//! # caseflow-config
//!
//! Layered configuration loading for Caseflow using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CASEFLOW_*` prefix, `__` as separator)
//! 2. Project-level `.caseflow/config.toml`
//! 3. User-level `~/.config/caseflow/config.toml`
//! 4. Built-in defaults
//!
//! `CASEFLOW_WORKFLOW__REQUIRED_VALIDATION_SCORE=70` maps to
//! `workflow.required_validation_score`.
//!
//! # Usage
//!
//! ```no_run
//! use caseflow_config::CaseflowConfig;
//!
//! let config = CaseflowConfig::load_with_dotenv().expect("config");
//! println!("submit threshold: {}", config.workflow.required_validation_score);
//! ```

mod database;
mod error;
mod workflow;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use workflow::WorkflowConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project-local config directory.
pub const LOCAL_DIR: &str = ".caseflow";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CaseflowConfig {
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl CaseflowConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`load_with_dotenv`](Self::load_with_dotenv)
    /// for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source fails to parse and
    /// `ConfigError::InvalidValue` if a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory, then [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = Path::new(LOCAL_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("CASEFLOW_").split("__"))
    }

    /// Check every section for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError::InvalidValue` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.workflow.validate()?;
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("caseflow").join("config.toml"))
    }
}
