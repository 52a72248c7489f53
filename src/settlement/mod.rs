//! Settlement of attendance days against work-model targets.
//!
//! Each day is settled under the rule of its status (see
//! [`StatusRule`](crate::models::StatusRule)). A period settlement totals
//! the days, books the hours delta onto the employee record and marks the
//! days as settled.

mod day;
mod period;

pub use day::{DaySettlement, settle_day};
pub use period::{PeriodSettlement, settle_period};
