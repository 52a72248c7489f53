//! Tabular employee import.
//!
//! This module defines the CSV row contract, the row-failure policy and the
//! report returned by [`EmployeeRegistry::load_from_table`].
//!
//! [`EmployeeRegistry::load_from_table`]: super::EmployeeRegistry::load_from_table

use std::io;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::LedgerSettings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{EmployeeRecord, normalize_name};
use crate::storage::table_error;

/// Column names written when saving a registry.
pub const EMPLOYEE_HEADERS: [&str; 9] = [
    "identifier",
    "last_name",
    "first_name",
    "work_model",
    "vacation_total",
    "vacation_taken",
    "hours_balance",
    "rank",
    "unit",
];

/// Required columns, each with the alias accepted from older tables.
const REQUIRED_COLUMNS: [(&str, &str); 4] = [
    ("identifier", "Personalnummer"),
    ("last_name", "Nachname"),
    ("first_name", "Vorname"),
    ("work_model", "Arbeitszeitmodell"),
];

/// What an import does when a row is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportPolicy {
    /// Add every valid row and list the malformed ones in the report.
    #[default]
    SkipInvalid,
    /// Add nothing if any row is malformed.
    AbortOnError,
}

/// A malformed row that was not imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// The 1-based CSV line of the row (the header is line 1).
    pub line: u64,
    /// What was wrong with the row.
    pub message: String,
}

/// The outcome of one import.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    /// Identifies this import in logs.
    pub import_id: Uuid,
    /// Number of records added to the registry.
    pub loaded: usize,
    /// Rows that were skipped.
    pub rejected: Vec<RowError>,
}

impl ImportReport {
    pub(crate) fn new() -> Self {
        Self {
            import_id: Uuid::new_v4(),
            loaded: 0,
            rejected: Vec::new(),
        }
    }

    /// Returns true if no row was rejected.
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// One employee row as it appears in a table.
///
/// Every cell is read as text so that a bad number is reported per row
/// rather than failing the whole table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EmployeeRow {
    #[serde(alias = "Personalnummer")]
    identifier: String,
    #[serde(alias = "Nachname")]
    last_name: String,
    #[serde(alias = "Vorname")]
    first_name: String,
    #[serde(alias = "Arbeitszeitmodell")]
    work_model: String,
    #[serde(alias = "Urlaubsanspruch")]
    vacation_total: String,
    #[serde(alias = "Urlaub")]
    vacation_taken: String,
    #[serde(alias = "Zeitkonto")]
    hours_balance: String,
    #[serde(alias = "Dienstgrad")]
    rank: String,
    #[serde(alias = "Teileinheit")]
    unit: String,
}

impl EmployeeRow {
    /// Builds a record, or explains why the row is malformed.
    ///
    /// Identifier format and uniqueness are checked by the registry.
    pub(crate) fn into_record(self, settings: &LedgerSettings) -> Result<EmployeeRecord, String> {
        let name = |value: String| {
            if settings.normalize_names {
                normalize_name(&value)
            } else {
                value.trim().to_string()
            }
        };

        let identifier = required("identifier", self.identifier.trim().to_string())?;
        let last_name = required("last_name", name(self.last_name))?;
        let first_name = required("first_name", name(self.first_name))?;
        let work_model = required("work_model", self.work_model.trim().to_string())?;

        let vacation_total = optional::<u32>("vacation_total", &self.vacation_total)?
            .unwrap_or(settings.default_vacation_days);
        let vacation_taken = optional::<u32>("vacation_taken", &self.vacation_taken)?.unwrap_or(0);
        let hours_balance = optional_decimal("hours_balance", &self.hours_balance)?
            .unwrap_or(Decimal::ZERO);

        let mut record =
            EmployeeRecord::new(identifier, last_name, first_name, work_model, vacation_total)
                .with_balances(vacation_taken, hours_balance)
                .map_err(|e| e.to_string())?;
        record.rank = non_empty(self.rank);
        record.unit = non_empty(self.unit);

        Ok(record)
    }
}

impl From<&EmployeeRecord> for EmployeeRow {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            identifier: record.identifier().to_string(),
            last_name: record.last_name.clone(),
            first_name: record.first_name.clone(),
            work_model: record.work_model.clone(),
            vacation_total: record.vacation_total().to_string(),
            vacation_taken: record.vacation_taken().to_string(),
            hours_balance: record.hours_balance().normalize().to_string(),
            rank: record.rank.clone().unwrap_or_default(),
            unit: record.unit.clone().unwrap_or_default(),
        }
    }
}

/// Reads every row of a CSV table with its line number.
///
/// Structural failures (unreadable header, missing required column, I/O)
/// fail the whole table. Anything wrong inside a row is returned as that
/// row's `Err` message.
pub(crate) fn read_rows<R: io::Read>(
    source: R,
    settings: &LedgerSettings,
) -> LedgerResult<Vec<(u64, Result<EmployeeRecord, String>)>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().map_err(table_error)?.clone();
    for (column, alias) in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column || h == alias) {
            return Err(LedgerError::TableError {
                message: format!("missing required column '{}'", column),
            });
        }
    }

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                let parsed = record
                    .deserialize::<EmployeeRow>(Some(&headers))
                    .map_err(|e| e.to_string())
                    .and_then(|row| row.into_record(settings));
                rows.push((line, parsed));
            }
            Err(e) if e.is_io_error() => return Err(table_error(e)),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                rows.push((line, Err(e.to_string())));
            }
        }
    }

    Ok(rows)
}

fn required(field: &str, value: String) -> Result<String, String> {
    if value.is_empty() {
        Err(format!("missing {}", field))
    } else {
        Ok(value)
    }
}

fn optional<T: FromStr>(field: &str, value: &str) -> Result<Option<T>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| format!("invalid {} '{}'", field, value))
}

fn optional_decimal(field: &str, value: &str) -> Result<Option<Decimal>, String> {
    // Older tables were written with a German decimal comma.
    optional::<Decimal>(field, &value.replace(',', "."))
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
