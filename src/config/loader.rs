//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading ledger
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{StatusCatalog, WorkModelCatalog};
use crate::registry::EmployeeRegistry;

use super::types::{LedgerConfig, LedgerSettings, StatusesConfig, WorkModelsConfig};

/// Loads and provides access to the ledger configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── ledger.yaml        # General settings
/// ├── work_models.yaml   # Weekly schedules
/// └── statuses.yaml      # Optional: custom statuses and target overrides
/// ```
///
/// # Example
///
/// ```no_run
/// use personnel_ledger::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let registry = loader.registry();
/// assert!(registry.is_empty());
/// println!("{} work models", loader.work_models().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: LedgerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `ledger.yaml` or `work_models.yaml` is missing,
    /// if any file contains invalid YAML, or if a work model or status
    /// fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("ledger.yaml");
        let settings = Self::load_yaml::<LedgerSettings>(&settings_path)?;
        if settings.identifier_length == Some(0) {
            return Err(LedgerError::ConfigParseError {
                path: settings_path.display().to_string(),
                message: "identifier_length must be at least 1".to_string(),
            });
        }

        let work_models_path = path.join("work_models.yaml");
        let work_models_config = Self::load_yaml::<WorkModelsConfig>(&work_models_path)?;
        let work_models = WorkModelCatalog::from_models(work_models_config.work_models)?;

        let statuses_path = path.join("statuses.yaml");
        let statuses = if statuses_path.exists() {
            let statuses_config = Self::load_yaml::<StatusesConfig>(&statuses_path)?;
            StatusCatalog::from_statuses(statuses_config.statuses)?
        } else {
            StatusCatalog::with_defaults()
        };

        info!(
            path = %path.display(),
            work_models = work_models.len(),
            statuses = statuses.len(),
            "Loaded ledger configuration"
        );

        Ok(Self {
            config: LedgerConfig::new(settings, work_models, statuses),
        })
    }

    /// Wraps an already assembled configuration.
    pub fn from_config(config: LedgerConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> LedgerResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LedgerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| LedgerError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Returns the general settings.
    pub fn settings(&self) -> &LedgerSettings {
        self.config.settings()
    }

    /// Returns the work model catalog.
    pub fn work_models(&self) -> &WorkModelCatalog {
        self.config.work_models()
    }

    /// Returns the status catalog.
    pub fn statuses(&self) -> &StatusCatalog {
        self.config.statuses()
    }

    /// Creates an empty registry governed by the loaded settings.
    pub fn registry(&self) -> EmployeeRegistry {
        EmployeeRegistry::with_settings(self.settings().clone())
    }
}
