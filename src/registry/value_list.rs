//! Single-column lists of allowed ranks and units.

use std::path::Path;

use tracing::info;

use crate::error::LedgerResult;
use crate::storage::{read_data_file, table_error, write_table};

/// Column name of the rank list (`Dienstgrade.csv`).
pub const RANK_COLUMN: &str = "Dienstgrad";

/// Column name of the unit list (`Teileinheiten.csv`).
pub const UNIT_COLUMN: &str = "Teileinheit";

/// An ordered list of distinct, non-empty values stored as a one-column table.
///
/// Values are trimmed. The first occurrence of a value wins, so the list
/// keeps the order in which values were first seen.
///
/// # Examples
///
/// ```
/// use personnel_ledger::registry::{UNIT_COLUMN, ValueList};
///
/// let units = ValueList::from_values(UNIT_COLUMN, [" 1. Zug", "2. Zug", "", "1. Zug"]);
/// assert_eq!(units.values(), ["1. Zug", "2. Zug"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueList {
    column: String,
    values: Vec<String>,
}

impl ValueList {
    /// Creates an empty list stored under `column`.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            values: Vec::new(),
        }
    }

    /// Builds a list, dropping blanks and repeats.
    pub fn from_values<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new(column);
        for value in values {
            list.add(value.as_ref());
        }
        list
    }

    /// Returns the column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Appends a value. Returns false if it is blank or already listed.
    pub fn add(&mut self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() || self.contains(value) {
            return false;
        }
        self.values.push(value.to_string());
        true
    }

    /// Removes a value. Returns false if it was not listed.
    pub fn remove(&mut self, value: &str) -> bool {
        let value = value.trim();
        let before = self.values.len();
        self.values.retain(|v| v != value);
        self.values.len() != before
    }

    /// Returns true if the trimmed value is listed.
    pub fn contains(&self, value: &str) -> bool {
        let value = value.trim();
        self.values.iter().any(|v| v == value)
    }

    /// Returns the values in first-seen order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Iterates over the values in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the list holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Loads the values of `column` from a CSV file.
    ///
    /// A missing or blank file, or a table without the column, yields an
    /// empty list. Other columns are ignored.
    pub fn load_from_path<P: AsRef<Path>>(path: P, column: &str) -> LedgerResult<Self> {
        let path = path.as_ref();
        let mut list = Self::new(column);
        let Some(content) = read_data_file(path)? else {
            return Ok(list);
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let headers = reader.headers().map_err(table_error)?.clone();
        let Some(index) = headers.iter().position(|h| h.trim() == column) else {
            return Ok(list);
        };

        for record in reader.records() {
            let record = record.map_err(table_error)?;
            if let Some(value) = record.get(index) {
                list.add(value);
            }
        }

        info!(path = %path.display(), column, values = list.len(), "Loaded value list");
        Ok(list)
    }

    /// Writes the header and one value per row, replacing the file atomically.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> LedgerResult<()> {
        let path = path.as_ref();
        write_table(path, &[self.column.as_str()], self.values.iter().map(|v| (v,)))?;
        info!(path = %path.display(), column = %self.column, values = self.len(), "Saved value list");
        Ok(())
    }
}
