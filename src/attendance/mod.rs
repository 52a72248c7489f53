//! Daily attendance records.
//!
//! The [`AttendanceBook`] keeps one [`AttendanceEntry`](crate::models::AttendanceEntry)
//! per employee and day. Days are generated with default statuses, filled
//! with start and end times, and settled by [`crate::settlement`]. An
//! [`AttendanceFilter`] selects entries by employee, unit and date range.

mod book;
mod filter;

pub use book::{ATTENDANCE_HEADERS, AttendanceBook, TimeUpdate, default_status};
pub use filter::AttendanceFilter;
