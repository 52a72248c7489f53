//! Error types for the personnel ledger.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while managing employee records,
//! importing tables and settling attendance.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the personnel ledger.
///
/// Vacation overbooking and lookup misses are not errors: they are reported
/// through `false` and `None` respectively. Everything else ends up here.
///
/// # Example
///
/// ```
/// use personnel_ledger::error::LedgerError;
///
/// let error = LedgerError::DuplicateEmployee {
///     identifier: "1001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee '1001' is already registered");
/// ```
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A data file could not be read or written.
    #[error("I/O error on '{path}': {message}")]
    Io {
        /// The file involved.
        path: String,
        /// The underlying I/O error message.
        message: String,
    },

    /// A table could not be read at all (bad header, broken encoding).
    #[error("Failed to read table: {message}")]
    TableError {
        /// A description of the failure.
        message: String,
    },

    /// An import row was malformed and the import was aborted.
    #[error("Invalid row at line {line}: {message}")]
    InvalidRow {
        /// The 1-based CSV line of the offending row.
        line: u64,
        /// A description of what made the row invalid.
        message: String,
    },

    /// An employee with the same identifier is already registered.
    #[error("Employee '{identifier}' is already registered")]
    DuplicateEmployee {
        /// The duplicated identifier.
        identifier: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A work model definition was inconsistent.
    #[error("Invalid work model '{name}': {message}")]
    InvalidWorkModel {
        /// The work model name.
        name: String,
        /// A description of the inconsistency.
        message: String,
    },

    /// A work model referenced by an employee does not exist.
    #[error("Work model not found: {name}")]
    UnknownWorkModel {
        /// The missing work model name.
        name: String,
    },

    /// An attendance status does not exist in the catalog.
    #[error("Attendance status not found: {name}")]
    UnknownStatus {
        /// The missing status name.
        name: String,
    },

    /// A status definition was invalid.
    #[error("Invalid attendance status '{name}': {message}")]
    InvalidStatus {
        /// The status name.
        name: String,
        /// A description of what made the status invalid.
        message: String,
    },

    /// A status with the same name already exists.
    #[error("Attendance status '{name}' already exists")]
    DuplicateStatus {
        /// The duplicated status name.
        name: String,
    },

    /// A built-in status cannot be removed or have its rule changed.
    #[error("Attendance status '{name}' is built in and cannot be modified")]
    ProtectedStatus {
        /// The protected status name.
        name: String,
    },

    /// An attendance day was already booked onto the hours ledger.
    #[error("Attendance of '{identifier}' on {date} is already settled")]
    AlreadySettled {
        /// The employee identifier.
        identifier: String,
        /// The settled day.
        date: NaiveDate,
    },
}

/// A type alias for Results that return LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;
