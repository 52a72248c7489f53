//! Employee record and balance accounting.
//!
//! This module defines the EmployeeRecord struct, which carries one person's
//! identity together with the vacation-day balance and the working-hours
//! ledger.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};

/// One employee with identity metadata and two running balances.
///
/// The identifier is fixed at construction. Balances only move through
/// [`book_vacation`](Self::book_vacation) and [`book_hours`](Self::book_hours).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeRecord {
    identifier: String,
    /// Family name.
    pub last_name: String,
    /// Given name.
    pub first_name: String,
    /// Work model tag (e.g., "Vollzeit"), usually the name of a
    /// [`WorkModel`](crate::models::WorkModel).
    pub work_model: String,
    /// Service rank, if recorded.
    pub rank: Option<String>,
    /// Organisational unit, if recorded.
    pub unit: Option<String>,
    vacation_total: u32,
    vacation_taken: u32,
    hours_balance: Decimal,
}

impl EmployeeRecord {
    /// Creates a record with the given entitlement and zero balances.
    ///
    /// # Examples
    ///
    /// ```
    /// use personnel_ledger::models::EmployeeRecord;
    ///
    /// let record = EmployeeRecord::new("1001", "Müller", "Hans", "Vollzeit", 30);
    /// assert_eq!(record.identifier(), "1001");
    /// assert_eq!(record.remaining_vacation(), 30);
    /// ```
    pub fn new(
        identifier: impl Into<String>,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        work_model: impl Into<String>,
        vacation_total: u32,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            last_name: last_name.into(),
            first_name: first_name.into(),
            work_model: work_model.into(),
            rank: None,
            unit: None,
            vacation_total,
            vacation_taken: 0,
            hours_balance: Decimal::ZERO,
        }
    }

    /// Restores persisted balances.
    ///
    /// Fails with `InvalidEmployee` if `vacation_taken` exceeds the
    /// entitlement.
    pub fn with_balances(
        mut self,
        vacation_taken: u32,
        hours_balance: Decimal,
    ) -> LedgerResult<Self> {
        if vacation_taken > self.vacation_total {
            return Err(LedgerError::InvalidEmployee {
                field: "vacation_taken".to_string(),
                message: format!(
                    "{} days taken exceeds entitlement of {}",
                    vacation_taken, self.vacation_total
                ),
            });
        }
        self.vacation_taken = vacation_taken;
        self.hours_balance = hours_balance;
        Ok(self)
    }

    /// Returns the immutable identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the annual vacation entitlement in days.
    pub fn vacation_total(&self) -> u32 {
        self.vacation_total
    }

    /// Returns the vacation days booked so far.
    pub fn vacation_taken(&self) -> u32 {
        self.vacation_taken
    }

    /// Returns the signed hours ledger.
    pub fn hours_balance(&self) -> Decimal {
        self.hours_balance
    }

    /// Returns "Last, First" for listings.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// Books vacation days against the entitlement.
    ///
    /// Returns `true` and adds `days` if the remaining entitlement covers the
    /// whole request. Returns `false` and leaves the record unchanged if it
    /// does not, or if `days` is zero. There is no partial booking.
    ///
    /// # Examples
    ///
    /// ```
    /// use personnel_ledger::models::EmployeeRecord;
    ///
    /// let mut record = EmployeeRecord::new("1001", "Müller", "Hans", "Vollzeit", 30);
    /// assert!(record.book_vacation(5));
    /// assert_eq!(record.remaining_vacation(), 25);
    ///
    /// assert!(!record.book_vacation(30));
    /// assert_eq!(record.remaining_vacation(), 25);
    /// ```
    pub fn book_vacation(&mut self, days: u32) -> bool {
        if days == 0 {
            debug!(identifier = %self.identifier, "Rejected vacation booking of zero days");
            return false;
        }

        match self.vacation_taken.checked_add(days) {
            Some(taken) if taken <= self.vacation_total => {
                self.vacation_taken = taken;
                true
            }
            _ => {
                debug!(
                    identifier = %self.identifier,
                    requested = days,
                    remaining = self.remaining_vacation(),
                    "Rejected vacation booking exceeding entitlement"
                );
                false
            }
        }
    }

    /// Adds `hours` (positive credit or negative debit) to the hours ledger.
    ///
    /// # Examples
    ///
    /// ```
    /// use personnel_ledger::models::EmployeeRecord;
    /// use rust_decimal::Decimal;
    ///
    /// let mut record = EmployeeRecord::new("1001", "Müller", "Hans", "Vollzeit", 30);
    /// record.book_hours(Decimal::new(35, 1));
    /// record.book_hours(Decimal::new(-10, 1));
    /// assert_eq!(record.hours_balance(), Decimal::new(25, 1));
    /// ```
    pub fn book_hours(&mut self, hours: Decimal) {
        self.hours_balance += hours;
    }

    /// Returns the vacation days still available.
    pub fn remaining_vacation(&self) -> u32 {
        self.vacation_total - self.vacation_taken
    }
}

/// Trims a name, collapses inner whitespace and title-cases each word.
///
/// # Examples
///
/// ```
/// use personnel_ledger::models::normalize_name;
///
/// assert_eq!(normalize_name("  müLLer   meier "), "Müller Meier");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    // A letter starts a new part after any non-letter: "Müller-Lüdenscheidt", "O'Brien".
    let mut title = String::with_capacity(word.len());
    let mut after_letter = false;
    for c in word.chars() {
        if after_letter {
            title.extend(c.to_lowercase());
        } else {
            title.extend(c.to_uppercase());
        }
        after_letter = c.is_alphabetic();
    }
    title
}
