//! Configuration types for the personnel ledger.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::models::{AttendanceStatus, StatusCatalog, WorkModel, WorkModelCatalog};
use crate::registry::ImportPolicy;

/// General settings from `ledger.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerSettings {
    /// Entitlement given to imported rows without a `vacation_total` cell.
    pub default_vacation_days: u32,
    /// What an import does with malformed rows.
    pub import_policy: ImportPolicy,
    /// When set, identifiers must consist of exactly this many digits.
    pub identifier_length: Option<usize>,
    /// Normalize imported names (trim, collapse spaces, title case).
    pub normalize_names: bool,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            default_vacation_days: 30,
            import_policy: ImportPolicy::SkipInvalid,
            identifier_length: None,
            normalize_names: false,
        }
    }
}

/// Work models file structure (`work_models.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct WorkModelsConfig {
    /// The configured work models.
    pub work_models: Vec<WorkModel>,
}

/// Statuses file structure (`statuses.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct StatusesConfig {
    /// Custom statuses and target-hour overrides of built-in ones.
    #[serde(default)]
    pub statuses: Vec<AttendanceStatus>,
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    settings: LedgerSettings,
    work_models: WorkModelCatalog,
    statuses: StatusCatalog,
}

impl LedgerConfig {
    /// Creates a new LedgerConfig from its component parts.
    pub fn new(
        settings: LedgerSettings,
        work_models: WorkModelCatalog,
        statuses: StatusCatalog,
    ) -> Self {
        Self {
            settings,
            work_models,
            statuses,
        }
    }

    /// Returns the general settings.
    pub fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    /// Returns the work model catalog.
    pub fn work_models(&self) -> &WorkModelCatalog {
        &self.work_models
    }

    /// Returns the status catalog.
    pub fn statuses(&self) -> &StatusCatalog {
        &self.statuses
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new(
            LedgerSettings::default(),
            WorkModelCatalog::new(),
            StatusCatalog::with_defaults(),
        )
    }
}
