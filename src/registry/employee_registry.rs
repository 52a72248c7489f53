//! The in-memory employee collection.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use tracing::{info, warn};

use crate::config::LedgerSettings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::EmployeeRecord;
use crate::storage::{read_data_file, write_table};

use super::import::{EMPLOYEE_HEADERS, EmployeeRow, ImportPolicy, ImportReport, RowError, read_rows};

/// An ordered collection of employee records keyed by identifier.
///
/// Records keep their insertion order. Identifiers are unique: adding a
/// second record with a known identifier fails. The registry owns its
/// records, so every change goes through `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct EmployeeRegistry {
    members: Vec<EmployeeRecord>,
    settings: LedgerSettings,
}

impl EmployeeRegistry {
    /// Creates an empty registry with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry governed by `settings`.
    pub fn with_settings(settings: LedgerSettings) -> Self {
        Self {
            members: Vec::new(),
            settings,
        }
    }

    /// Returns the settings used for identifier checks and imports.
    pub fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    /// Appends a record.
    ///
    /// Fails with `InvalidEmployee` if the identifier is empty, carries
    /// surrounding whitespace or breaks the configured length rule. Fails with
    /// `DuplicateEmployee` if it is already registered. The registry is
    /// unchanged on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use personnel_ledger::models::EmployeeRecord;
    /// use personnel_ledger::registry::EmployeeRegistry;
    ///
    /// let mut registry = EmployeeRegistry::new();
    /// registry
    ///     .add_employee(EmployeeRecord::new("1001", "Müller", "Hans", "Vollzeit", 30))
    ///     .unwrap();
    /// assert!(registry
    ///     .add_employee(EmployeeRecord::new("1001", "Meier", "Eva", "Teilzeit", 30))
    ///     .is_err());
    /// assert_eq!(registry.len(), 1);
    /// ```
    pub fn add_employee(&mut self, record: EmployeeRecord) -> LedgerResult<()> {
        self.check_identifier(record.identifier())?;
        if self.find_employee(record.identifier()).is_some() {
            return Err(LedgerError::DuplicateEmployee {
                identifier: record.identifier().to_string(),
            });
        }
        self.members.push(record);
        Ok(())
    }

    /// Returns the record with the given identifier, or `None`.
    pub fn find_employee(&self, identifier: &str) -> Option<&EmployeeRecord> {
        self.members.iter().find(|r| r.identifier() == identifier)
    }

    /// Returns the record with the given identifier for booking.
    pub fn find_employee_mut(&mut self, identifier: &str) -> Option<&mut EmployeeRecord> {
        self.members.iter_mut().find(|r| r.identifier() == identifier)
    }

    /// Removes and returns the record with the given identifier.
    pub fn remove_employee(&mut self, identifier: &str) -> Option<EmployeeRecord> {
        let index = self
            .members
            .iter()
            .position(|r| r.identifier() == identifier)?;
        Some(self.members.remove(index))
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the registry holds no records.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over the records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &EmployeeRecord> {
        self.members.iter()
    }

    /// Returns all identifiers in insertion order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.members.iter().map(EmployeeRecord::identifier).collect()
    }

    /// Imports employees from a CSV table.
    ///
    /// The table needs a header with at least the identifier, name and work
    /// model columns. What happens to malformed rows depends on the
    /// configured [`ImportPolicy`]:
    ///
    /// - `SkipInvalid` adds every valid row and lists the others in the
    ///   returned report.
    /// - `AbortOnError` fails with `InvalidRow` on the first malformed row
    ///   and adds nothing.
    ///
    /// A table-level problem (unreadable input, missing column) fails with
    /// `TableError` and adds nothing under either policy.
    pub fn load_from_table<R: io::Read>(&mut self, source: R) -> LedgerResult<ImportReport> {
        let rows = read_rows(source, &self.settings)?;
        let mut report = ImportReport::new();

        match self.settings.import_policy {
            ImportPolicy::SkipInvalid => {
                for (line, parsed) in rows {
                    let outcome = parsed.and_then(|record| {
                        self.add_employee(record).map_err(|e| e.to_string())
                    });
                    match outcome {
                        Ok(()) => report.loaded += 1,
                        Err(message) => report.rejected.push(RowError { line, message }),
                    }
                }
            }
            ImportPolicy::AbortOnError => {
                let staged = self.stage_rows(rows).map_err(|error| {
                    warn!(import_id = %report.import_id, %error, "Import aborted");
                    error
                })?;
                report.loaded = staged.len();
                self.members.extend(staged);
            }
        }

        if report.is_complete() {
            info!(
                import_id = %report.import_id,
                loaded = report.loaded,
                "Imported employees"
            );
        } else {
            warn!(
                import_id = %report.import_id,
                loaded = report.loaded,
                rejected = report.rejected.len(),
                "Imported employees with rejected rows"
            );
        }

        Ok(report)
    }

    /// Loads employees from a CSV file.
    ///
    /// A missing or blank file yields an empty report.
    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> LedgerResult<ImportReport> {
        match read_data_file(path.as_ref())? {
            Some(content) => self.load_from_table(content.as_bytes()),
            None => Ok(ImportReport::new()),
        }
    }

    /// Writes every record, balances included, to a CSV file.
    ///
    /// The file is replaced atomically.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> LedgerResult<()> {
        let path = path.as_ref();
        write_table(
            path,
            &EMPLOYEE_HEADERS,
            self.members.iter().map(EmployeeRow::from),
        )?;
        info!(path = %path.display(), employees = self.len(), "Saved employees");
        Ok(())
    }

    /// Validates every row against the registry without changing it.
    fn stage_rows(
        &self,
        rows: Vec<(u64, Result<EmployeeRecord, String>)>,
    ) -> LedgerResult<Vec<EmployeeRecord>> {
        let mut seen: HashSet<String> = self.identifiers().into_iter().map(String::from).collect();
        let mut staged = Vec::with_capacity(rows.len());

        for (line, parsed) in rows {
            let record = parsed.map_err(|message| LedgerError::InvalidRow { line, message })?;
            self.check_identifier(record.identifier())
                .map_err(|e| LedgerError::InvalidRow {
                    line,
                    message: e.to_string(),
                })?;
            if !seen.insert(record.identifier().to_string()) {
                return Err(LedgerError::InvalidRow {
                    line,
                    message: LedgerError::DuplicateEmployee {
                        identifier: record.identifier().to_string(),
                    }
                    .to_string(),
                });
            }
            staged.push(record);
        }

        Ok(staged)
    }

    fn check_identifier(&self, identifier: &str) -> LedgerResult<()> {
        if identifier.trim().is_empty() {
            return Err(LedgerError::InvalidEmployee {
                field: "identifier".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if identifier.trim() != identifier {
            return Err(LedgerError::InvalidEmployee {
                field: "identifier".to_string(),
                message: format!("'{}' must not have surrounding whitespace", identifier),
            });
        }

        if let Some(length) = self.settings.identifier_length {
            let valid = identifier.len() == length && identifier.bytes().all(|b| b.is_ascii_digit());
            if !valid {
                return Err(LedgerError::InvalidEmployee {
                    field: "identifier".to_string(),
                    message: format!("'{}' must be exactly {} digits", identifier, length),
                });
            }
        }

        Ok(())
    }
}
