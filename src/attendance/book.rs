//! The attendance book: one entry per employee and day.

use std::ops::Range;
use std::path::Path;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AttendanceEntry, STATUS_PRESENT, STATUS_WEEKEND, StatusCatalog};
use crate::storage::{read_data_file, table_error, write_table};

/// Column names of the attendance table.
pub const ATTENDANCE_HEADERS: [&str; 7] = [
    "identifier",
    "date",
    "status",
    "start",
    "end",
    "break_minutes",
    "settled",
];

/// How many time fields a [`AttendanceBook::set_times`] call wrote or left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TimeUpdate {
    /// Fields that were written.
    pub changed: usize,
    /// Fields that already held a value and were kept.
    pub skipped: usize,
}

/// Attendance entries sorted by identifier and date.
///
/// There is at most one entry per identifier and day.
#[derive(Debug, Clone, Default)]
pub struct AttendanceBook {
    entries: Vec<AttendanceEntry>,
}

/// The status a generated entry starts with.
pub fn default_status(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => STATUS_WEEKEND,
        _ => STATUS_PRESENT,
    }
}

impl AttendanceBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the book holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in (identifier, date) order.
    pub fn iter(&self) -> impl Iterator<Item = &AttendanceEntry> {
        self.entries.iter()
    }

    /// Returns the entry for one employee and day.
    pub fn get(&self, identifier: &str, date: NaiveDate) -> Option<&AttendanceEntry> {
        self.locate(identifier, date).ok().map(|i| &self.entries[i])
    }

    /// Creates the missing entries for every day from `from` to `to`.
    ///
    /// Weekdays start as "Anwesend", Saturdays and Sundays as "Wochenende".
    /// Existing entries are kept. Returns the number of entries added.
    ///
    /// # Examples
    ///
    /// ```
    /// use personnel_ledger::attendance::AttendanceBook;
    /// use chrono::NaiveDate;
    ///
    /// let mut book = AttendanceBook::new();
    /// let from = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    /// let to = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap();
    ///
    /// assert_eq!(book.ensure_span("1001", from, to), 7);
    /// assert_eq!(book.ensure_span("1001", from, to), 0);
    /// assert_eq!(book.get("1001", to).unwrap().status, "Wochenende");
    /// ```
    pub fn ensure_span(&mut self, identifier: &str, from: NaiveDate, to: NaiveDate) -> usize {
        let mut added = 0;
        for date in from.iter_days().take_while(|d| *d <= to) {
            if let Err(index) = self.locate(identifier, date) {
                self.entries.insert(
                    index,
                    AttendanceEntry::new(identifier, date, default_status(date)),
                );
                added += 1;
            }
        }

        if added > 0 {
            debug!(identifier, %from, %to, added, "Created attendance entries");
        }
        added
    }

    /// Removes every entry of an employee and returns how many went.
    pub fn purge(&mut self, identifier: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.identifier != identifier);
        before - self.entries.len()
    }

    /// Records start and end times for one day.
    ///
    /// The entry is created if needed. A `None` argument leaves that field
    /// untouched. Unless `overwrite` is set, only empty fields are filled.
    pub fn set_times(
        &mut self,
        identifier: &str,
        date: NaiveDate,
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
        overwrite: bool,
    ) -> TimeUpdate {
        let entry = self.entry_mut(identifier, date);
        let mut update = TimeUpdate::default();

        for (slot, value) in [(&mut entry.start, start), (&mut entry.end, end)] {
            let Some(value) = value else { continue };
            if slot.is_none() || overwrite {
                *slot = Some(value);
                update.changed += 1;
            } else {
                update.skipped += 1;
            }
        }

        update
    }

    /// Records the break for one day, creating the entry if needed.
    pub fn set_break(&mut self, identifier: &str, date: NaiveDate, minutes: u32) {
        self.entry_mut(identifier, date).break_minutes = minutes;
    }

    /// Sets the status of one day, creating the entry if needed.
    ///
    /// The name is looked up case-insensitively and stored as the catalog
    /// spells it. Fails with `UnknownStatus` if the catalog lacks it.
    pub fn set_status(
        &mut self,
        identifier: &str,
        date: NaiveDate,
        status: &str,
        statuses: &StatusCatalog,
    ) -> LedgerResult<()> {
        let name = statuses.require(status)?.name.clone();
        self.entry_mut(identifier, date).status = name;
        Ok(())
    }

    /// Returns the entries of one employee from `from` to `to`, inclusive.
    pub fn entries_for(&self, identifier: &str, from: NaiveDate, to: NaiveDate) -> &[AttendanceEntry] {
        let range = self.span(identifier, from, to);
        &self.entries[range]
    }

    pub(crate) fn entries_for_mut(
        &mut self,
        identifier: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> &mut [AttendanceEntry] {
        let range = self.span(identifier, from, to);
        &mut self.entries[range]
    }

    /// Loads entries from a CSV file, replacing entries for the same day.
    ///
    /// A missing or blank file loads nothing. Tables of the legacy tool
    /// (German headers, extra ledger columns) are accepted. Rows without a
    /// status get the default status of their day. A malformed row fails the
    /// load with `InvalidRow` and leaves the book unchanged.
    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> LedgerResult<usize> {
        let path = path.as_ref();
        let Some(content) = read_data_file(path)? else {
            return Ok(0);
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let headers = reader.headers().map_err(table_error)?.clone();

        let mut loaded = Vec::new();
        let mut record = csv::StringRecord::new();
        loop {
            match reader.read_record(&mut record) {
                Ok(false) => break,
                Ok(true) => {
                    let line = record.position().map(|p| p.line()).unwrap_or_default();
                    let mut entry: AttendanceEntry = record
                        .deserialize(Some(&headers))
                        .map_err(|e| LedgerError::InvalidRow {
                            line,
                            message: e.to_string(),
                        })?;
                    if entry.status.is_empty() {
                        entry.status = default_status(entry.date).to_string();
                    }
                    loaded.push(entry);
                }
                Err(e) if e.is_io_error() => return Err(table_error(e)),
                Err(e) => {
                    return Err(LedgerError::InvalidRow {
                        line: e.position().map(|p| p.line()).unwrap_or_default(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let count = loaded.len();
        for entry in loaded {
            self.upsert(entry);
        }
        info!(path = %path.display(), entries = count, "Loaded attendance");
        Ok(count)
    }

    /// Writes every entry to a CSV file, replacing it atomically.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> LedgerResult<()> {
        let path = path.as_ref();
        write_table(path, &ATTENDANCE_HEADERS, self.entries.iter())?;
        info!(path = %path.display(), entries = self.len(), "Saved attendance");
        Ok(())
    }

    fn span(&self, identifier: &str, from: NaiveDate, to: NaiveDate) -> Range<usize> {
        if from > to {
            return 0..0;
        }
        let lower = self
            .entries
            .partition_point(|e| (e.identifier.as_str(), e.date) < (identifier, from));
        let upper = self
            .entries
            .partition_point(|e| (e.identifier.as_str(), e.date) <= (identifier, to));
        lower..upper
    }

    fn locate(&self, identifier: &str, date: NaiveDate) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|e| (e.identifier.as_str(), e.date).cmp(&(identifier, date)))
    }

    fn entry_mut(&mut self, identifier: &str, date: NaiveDate) -> &mut AttendanceEntry {
        let index = match self.locate(identifier, date) {
            Ok(index) => index,
            Err(index) => {
                self.entries.insert(
                    index,
                    AttendanceEntry::new(identifier, date, default_status(date)),
                );
                index
            }
        };
        &mut self.entries[index]
    }

    fn upsert(&mut self, entry: AttendanceEntry) {
        match self.locate(&entry.identifier, entry.date) {
            Ok(index) => self.entries[index] = entry,
            Err(index) => self.entries.insert(index, entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, StatusRule};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
    }

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_ensure_span_assigns_default_statuses() {
        let mut book = AttendanceBook::new();
        // 2025-09-05 is a Friday.
        assert_eq!(book.ensure_span("1001", date(5), date(8)), 4);

        let statuses: Vec<&str> = book.iter().map(|e| e.status.as_str()).collect();
        assert_eq!(statuses, vec!["Anwesend", "Wochenende", "Wochenende", "Anwesend"]);
    }

    #[test]
    fn test_ensure_span_is_idempotent_and_keeps_entries() {
        let mut book = AttendanceBook::new();
        book.ensure_span("1001", date(1), date(3));
        book.set_times("1001", date(2), Some(time(7, 0)), None, false);

        assert_eq!(book.ensure_span("1001", date(1), date(5)), 2);
        assert_eq!(book.len(), 5);
        assert_eq!(book.get("1001", date(2)).unwrap().start, Some(time(7, 0)));
    }

    #[test]
    fn test_ensure_span_with_reversed_range_adds_nothing() {
        let mut book = AttendanceBook::new();
        assert_eq!(book.ensure_span("1001", date(5), date(1)), 0);
        assert!(book.is_empty());
    }

    #[test]
    fn test_entries_stay_sorted_across_employees() {
        let mut book = AttendanceBook::new();
        book.ensure_span("2002", date(1), date(2));
        book.ensure_span("1001", date(2), date(3));
        book.ensure_span("1001", date(1), date(1));

        let keys: Vec<(&str, u32)> = book
            .iter()
            .map(|e| (e.identifier.as_str(), e.date.day()))
            .collect();
        assert_eq!(
            keys,
            vec![("1001", 1), ("1001", 2), ("1001", 3), ("2002", 1), ("2002", 2)]
        );
    }

    #[test]
    fn test_purge_removes_only_one_employee() {
        let mut book = AttendanceBook::new();
        book.ensure_span("1001", date(1), date(7));
        book.ensure_span("1002", date(1), date(3));

        assert_eq!(book.purge("1001"), 7);
        assert_eq!(book.purge("1001"), 0);
        assert_eq!(book.len(), 3);
    }

    #[test]
    fn test_set_times_fills_only_empty_fields() {
        let mut book = AttendanceBook::new();

        let first = book.set_times("1001", date(1), Some(time(7, 0)), None, false);
        assert_eq!(first, TimeUpdate { changed: 1, skipped: 0 });

        let second = book.set_times("1001", date(1), Some(time(8, 0)), Some(time(16, 0)), false);
        assert_eq!(second, TimeUpdate { changed: 1, skipped: 1 });

        let entry = book.get("1001", date(1)).unwrap();
        assert_eq!(entry.start, Some(time(7, 0)));
        assert_eq!(entry.end, Some(time(16, 0)));
    }

    #[test]
    fn test_set_times_overwrite() {
        let mut book = AttendanceBook::new();
        book.set_times("1001", date(1), Some(time(7, 0)), Some(time(15, 0)), false);

        let update = book.set_times("1001", date(1), Some(time(6, 30)), None, true);
        assert_eq!(update, TimeUpdate { changed: 1, skipped: 0 });
        assert_eq!(book.get("1001", date(1)).unwrap().start, Some(time(6, 30)));
        assert_eq!(book.get("1001", date(1)).unwrap().end, Some(time(15, 0)));
    }

    #[test]
    fn test_set_status_uses_catalog_spelling() {
        let mut book = AttendanceBook::new();
        let statuses = StatusCatalog::with_defaults();

        book.set_status("1001", date(1), "urlaub", &statuses).unwrap();
        assert_eq!(book.get("1001", date(1)).unwrap().status, "Urlaub");
    }

    #[test]
    fn test_set_status_rejects_unknown_name() {
        let mut book = AttendanceBook::new();
        let statuses = StatusCatalog::with_defaults();

        match book.set_status("1001", date(1), "Kantine", &statuses) {
            Err(LedgerError::UnknownStatus { name }) => assert_eq!(name, "Kantine"),
            _ => panic!("Expected UnknownStatus error"),
        }
        assert!(book.is_empty());
    }

    #[test]
    fn test_set_status_accepts_custom_status() {
        let mut book = AttendanceBook::new();
        let mut statuses = StatusCatalog::with_defaults();
        statuses
            .add(AttendanceStatus::new("Lehrgang", StatusRule::Neutral))
            .unwrap();

        book.set_status("1001", date(1), "Lehrgang", &statuses).unwrap();
        assert_eq!(book.get("1001", date(1)).unwrap().status, "Lehrgang");
    }

    #[test]
    fn test_entries_for_is_inclusive_and_scoped() {
        let mut book = AttendanceBook::new();
        book.ensure_span("1001", date(1), date(10));
        book.ensure_span("1002", date(1), date(10));

        let entries = book.entries_for("1001", date(3), date(5));
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.identifier == "1001"));
        assert_eq!(entries[0].date, date(3));
        assert_eq!(entries[2].date, date(5));

        assert!(book.entries_for("1001", date(5), date(3)).is_empty());
        assert!(book.entries_for("9999", date(1), date(10)).is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("ledger-attendance-{}", uuid::Uuid::new_v4()));
        let path = dir.join("Anwesenheit.csv");

        let mut book = AttendanceBook::new();
        book.ensure_span("1001", date(1), date(2));
        book.set_times("1001", date(1), Some(time(6, 30)), Some(time(15, 0)), false);
        book.set_break("1001", date(1), 30);
        book.save_to_path(&path).unwrap();

        let mut loaded = AttendanceBook::new();
        assert_eq!(loaded.load_from_path(&path).unwrap(), 2);
        assert_eq!(loaded.iter().collect::<Vec<_>>(), book.iter().collect::<Vec<_>>());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_load_fills_missing_status_and_replaces_existing_day() {
        let dir = std::env::temp_dir().join(format!("ledger-attendance-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Anwesenheit.csv");
        std::fs::write(
            &path,
            "identifier,date,status,start,end,break_minutes\n\
             1001,2025-09-06,,,,0\n\
             1001,2025-09-01,Krank,,,0\n",
        )
        .unwrap();

        let mut book = AttendanceBook::new();
        book.ensure_span("1001", date(1), date(1));
        assert_eq!(book.load_from_path(&path).unwrap(), 2);

        assert_eq!(book.get("1001", date(6)).unwrap().status, "Wochenende");
        assert_eq!(book.get("1001", date(1)).unwrap().status, "Krank");
        assert_eq!(book.len(), 2);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_load_bad_row_leaves_book_unchanged() {
        let dir = std::env::temp_dir().join(format!("ledger-attendance-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Anwesenheit.csv");
        std::fs::write(
            &path,
            "identifier,date,status,start,end,break_minutes\n\
             1001,2025-09-01,Anwesend,,,0\n\
             1001,not-a-date,Anwesend,,,0\n",
        )
        .unwrap();

        let mut book = AttendanceBook::new();
        match book.load_from_path(&path) {
            Err(LedgerError::InvalidRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("Expected InvalidRow error, got {:?}", other),
        }
        assert!(book.is_empty());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_load_legacy_table() {
        let dir = std::env::temp_dir().join(format!("ledger-attendance-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Anwesenheit.csv");
        std::fs::write(
            &path,
            "\u{feff}Personalnummer,Datum,Status,Anfang,Ende,Zeitkonto,Urlaub,Mehrarbeit,FvD\n\
             00001001,2025-09-01,Anwesend,06:30,15:00,,,,\n\
             00001001,2025-09-02,Urlaub,,,,,,\n",
        )
        .unwrap();

        let mut book = AttendanceBook::new();
        assert_eq!(book.load_from_path(&path).unwrap(), 2);

        let monday = book.get("00001001", date(1)).unwrap();
        assert_eq!(monday.start, Some(time(6, 30)));
        assert_eq!(monday.end, Some(time(15, 0)));
        assert_eq!(monday.break_minutes, 0);
        assert_eq!(book.get("00001001", date(2)).unwrap().status, "Urlaub");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_settled_flag_survives_save_and_load() {
        let dir = std::env::temp_dir().join(format!("ledger-attendance-{}", uuid::Uuid::new_v4()));
        let path = dir.join("Anwesenheit.csv");

        let mut book = AttendanceBook::new();
        book.ensure_span("1001", date(1), date(2));
        book.entries_for_mut("1001", date(1), date(1))[0].settled = true;
        book.save_to_path(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("identifier,date,status,start,end,break_minutes,settled\n"));

        let mut loaded = AttendanceBook::new();
        loaded.load_from_path(&path).unwrap();
        assert!(loaded.get("1001", date(1)).unwrap().settled);
        assert!(!loaded.get("1001", date(2)).unwrap().settled);

        std::fs::remove_dir_all(dir).unwrap();
    }
}
