//! Settlement of a range of attendance days for one employee.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::attendance::AttendanceBook;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{EmployeeRecord, StatusCatalog, WorkModelCatalog};

use super::day::{DaySettlement, settle_day};

/// The totals of a settled period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSettlement {
    /// The employee the period was settled for.
    pub identifier: String,
    /// Per-day results in date order.
    pub days: Vec<DaySettlement>,
    /// Total change booked to the hours ledger.
    pub hours_delta: Decimal,
    /// Total change to the overtime account.
    pub overtime_delta: Decimal,
    /// Duty days counted.
    pub duty_days: u32,
}

/// Settles the record's attendance from `from` to `to` and books the hours
/// total onto it.
///
/// Only days present in `book` are settled. Each settled day is marked, so a
/// day is booked at most once. Every day is checked before anything
/// changes:
///
/// - a day that was settled before fails with `AlreadySettled`
/// - a status missing from `statuses` fails with `UnknownStatus`
/// - a work model missing from `work_models` fails with `UnknownWorkModel`
///
/// On failure neither the record nor the book is changed. The overtime and
/// duty-day totals are returned but not stored on the record.
pub fn settle_period(
    record: &mut EmployeeRecord,
    book: &mut AttendanceBook,
    from: NaiveDate,
    to: NaiveDate,
    work_models: &WorkModelCatalog,
    statuses: &StatusCatalog,
) -> LedgerResult<PeriodSettlement> {
    let work_model = work_models.require(&record.work_model)?;
    let entries = book.entries_for(record.identifier(), from, to);

    let mut days = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.settled {
            return Err(LedgerError::AlreadySettled {
                identifier: entry.identifier.clone(),
                date: entry.date,
            });
        }
        let status = statuses.require(&entry.status)?;
        days.push(settle_day(entry, status, work_model.daily_hours(entry.date)));
    }

    for entry in book.entries_for_mut(record.identifier(), from, to) {
        entry.settled = true;
    }

    let settlement = PeriodSettlement {
        identifier: record.identifier().to_string(),
        hours_delta: days.iter().map(|d| d.hours_delta).sum(),
        overtime_delta: days.iter().map(|d| d.overtime_delta).sum(),
        duty_days: days.iter().map(|d| d.duty_days).sum(),
        days,
    };

    record.book_hours(settlement.hours_delta);

    info!(
        identifier = %settlement.identifier,
        %from,
        %to,
        days = settlement.days.len(),
        hours_delta = %settlement.hours_delta,
        overtime_delta = %settlement.overtime_delta,
        duty_days = settlement.duty_days,
        "Settled attendance period"
    );

    Ok(settlement)
}
