//! Core data models for the personnel ledger.
//!
//! This module contains the domain models used throughout the crate.

mod attendance;
mod employee;
mod status;
mod work_model;

pub use attendance::AttendanceEntry;
pub use employee::{EmployeeRecord, normalize_name};
pub use status::{AttendanceStatus, STATUS_PRESENT, STATUS_WEEKEND, StatusCatalog, StatusRule};
pub use work_model::{WEEKLY_HOURS_TOLERANCE, WorkModel, WorkModelCatalog};
