//! Configuration loading and management for the personnel ledger.
//!
//! This module loads the ledger configuration from YAML files: general
//! settings, work models and attendance statuses.
//!
//! # Example
//!
//! ```no_run
//! use personnel_ledger::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Default entitlement: {}", config.settings().default_vacation_days);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{LedgerConfig, LedgerSettings, StatusesConfig, WorkModelsConfig};
