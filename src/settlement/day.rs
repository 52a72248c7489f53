//! Settlement of a single attendance day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{AttendanceEntry, AttendanceStatus, StatusRule};

/// How one attendance day moves the ledgers.
///
/// # Example
///
/// ```
/// use personnel_ledger::models::{AttendanceEntry, AttendanceStatus, StatusRule};
/// use personnel_ledger::settlement::settle_day;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let mut entry = AttendanceEntry::new("1001", NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(), "Anwesend");
/// entry.start = NaiveTime::from_hms_opt(6, 0, 0);
/// entry.end = NaiveTime::from_hms_opt(16, 0, 0);
/// entry.break_minutes = 30;
///
/// let status = AttendanceStatus::new("Anwesend", StatusRule::Present);
/// let day = settle_day(&entry, &status, Decimal::new(85, 1));
/// assert_eq!(day.hours_delta, Decimal::ONE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySettlement {
    /// The settled day.
    pub date: NaiveDate,
    /// The status name of the entry.
    pub status: String,
    /// The daily target that applied.
    pub target_hours: Decimal,
    /// Net hours worked according to the entry's times.
    pub worked_hours: Decimal,
    /// Change to the hours ledger.
    pub hours_delta: Decimal,
    /// Change to the overtime account.
    pub overtime_delta: Decimal,
    /// Duty days counted (0 or 1).
    pub duty_days: u32,
    /// Human-readable explanation of the result.
    pub reasoning: String,
}

/// Settles one entry under its status.
///
/// `scheduled_hours` is the work model's target for the entry's weekday. A
/// `target_hours` override on the status takes precedence over it.
///
/// | rule               | effect                                   |
/// |--------------------|------------------------------------------|
/// | present            | hours ledger += worked − target          |
/// | neutral            | nothing                                  |
/// | time_compensation  | hours ledger −= target                   |
/// | overtime           | overtime += max(worked − target, 0)      |
/// | overtime_reduction | overtime −= target                       |
/// | duty_day           | one duty day                             |
pub fn settle_day(
    entry: &AttendanceEntry,
    status: &AttendanceStatus,
    scheduled_hours: Decimal,
) -> DaySettlement {
    let target = status.target_hours.unwrap_or(scheduled_hours);
    let worked = entry.worked_hours();

    let mut day = DaySettlement {
        date: entry.date,
        status: status.name.clone(),
        target_hours: target,
        worked_hours: worked,
        hours_delta: Decimal::ZERO,
        overtime_delta: Decimal::ZERO,
        duty_days: 0,
        reasoning: String::new(),
    };

    day.reasoning = match status.rule {
        StatusRule::Present => {
            day.hours_delta = worked - target;
            format!(
                "{} hours worked against {} hour target",
                worked.normalize(),
                target.normalize()
            )
        }
        StatusRule::Neutral => format!("{} does not move any ledger", status.name),
        StatusRule::TimeCompensation => {
            day.hours_delta = -target;
            format!("{} hour target debited as time off", target.normalize())
        }
        StatusRule::Overtime => {
            day.overtime_delta = (worked - target).max(Decimal::ZERO);
            format!(
                "{} hours worked, {} above the {} hour target count as overtime",
                worked.normalize(),
                day.overtime_delta.normalize(),
                target.normalize()
            )
        }
        StatusRule::OvertimeReduction => {
            day.overtime_delta = -target;
            format!("{} hours taken from the overtime account", target.normalize())
        }
        StatusRule::DutyDay => {
            day.duty_days = 1;
            "One duty day counted".to_string()
        }
    };

    day
}
