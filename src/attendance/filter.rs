//! Selection of attendance entries by employee, unit and date range.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::AttendanceEntry;
use crate::registry::EmployeeRegistry;

use super::AttendanceBook;

/// Criteria for [`AttendanceBook::filter`].
///
/// The date range is inclusive; a reversed range is swapped. An empty
/// identifier text or unit matches every entry.
///
/// # Examples
///
/// ```
/// use personnel_ledger::attendance::AttendanceFilter;
/// use chrono::NaiveDate;
///
/// let from = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap();
/// let to = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
/// let filter = AttendanceFilter::new(from, to).with_unit("1. Zug");
///
/// assert_eq!(filter.range(), (to, from));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceFilter {
    identifier_contains: String,
    unit: String,
    from: NaiveDate,
    to: NaiveDate,
}

impl AttendanceFilter {
    /// Selects every entry from `from` to `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        let (from, to) = if from > to { (to, from) } else { (from, to) };
        Self {
            identifier_contains: String::new(),
            unit: String::new(),
            from,
            to,
        }
    }

    /// Keeps entries whose identifier contains `text`, ignoring case.
    pub fn with_identifier(mut self, text: &str) -> Self {
        self.identifier_contains = text.trim().to_lowercase();
        self
    }

    /// Keeps entries of employees assigned to exactly this unit.
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.trim().to_string();
        self
    }

    /// Returns the inclusive date range in ascending order.
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        (self.from, self.to)
    }

    /// Returns true if `entry`, belonging to an employee of `unit`, is selected.
    pub fn matches(&self, entry: &AttendanceEntry, unit: &str) -> bool {
        if entry.date < self.from || entry.date > self.to {
            return false;
        }
        if !self.identifier_contains.is_empty()
            && !entry.identifier.to_lowercase().contains(&self.identifier_contains)
        {
            return false;
        }
        self.unit.is_empty() || unit.trim() == self.unit
    }
}

impl AttendanceBook {
    /// Returns the entries selected by `filter` in (identifier, date) order.
    ///
    /// Units are looked up in `registry`. Entries of employees missing from
    /// the registry, or without a unit, only pass a filter without a unit.
    pub fn filter<'a>(
        &'a self,
        filter: &AttendanceFilter,
        registry: &EmployeeRegistry,
    ) -> Vec<&'a AttendanceEntry> {
        let units: HashMap<&str, &str> = registry
            .iter()
            .map(|r| (r.identifier(), r.unit.as_deref().unwrap_or_default()))
            .collect();

        self.iter()
            .filter(|entry| {
                let unit = units.get(entry.identifier.as_str()).copied().unwrap_or_default();
                filter.matches(entry, unit)
            })
            .collect()
    }
}
