//! Property tests for balance accounting and attendance spans.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use proptest::test_runner::Config;
use rust_decimal::Decimal;

use personnel_ledger::attendance::AttendanceBook;
use personnel_ledger::models::EmployeeRecord;

fn record_with(total: u32, taken: u32) -> EmployeeRecord {
    EmployeeRecord::new("1001", "Müller", "Hans", "Vollzeit", total)
        .with_balances(taken, Decimal::ZERO)
        .expect("taken within total")
}

/// Hours with two decimal places, as entered on time sheets.
fn hours() -> impl Strategy<Value = Decimal> {
    (-100_000_i64..100_000_i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn successful_booking_adds_exactly_the_days(
        total in 0_u32..400,
        taken_share in 0.0_f64..=1.0,
        days in 1_u32..400,
    ) {
        let taken = (f64::from(total) * taken_share) as u32;
        let mut record = record_with(total, taken);

        if record.book_vacation(days) {
            prop_assert_eq!(record.vacation_taken(), taken + days);
        } else {
            prop_assert_eq!(record.vacation_taken(), taken);
            prop_assert!(taken + days > total);
        }
        prop_assert!(record.vacation_taken() <= record.vacation_total());
        prop_assert_eq!(
            record.remaining_vacation(),
            record.vacation_total() - record.vacation_taken()
        );
    }

    #[test]
    fn overbooking_is_rejected_and_changes_nothing(
        total in 0_u32..400,
        taken_share in 0.0_f64..=1.0,
        excess in 1_u32..100,
    ) {
        let taken = (f64::from(total) * taken_share) as u32;
        let mut record = record_with(total, taken);
        let days = total - taken + excess;

        prop_assert!(!record.book_vacation(days));
        prop_assert!(!record.book_vacation(days));
        prop_assert_eq!(record.vacation_taken(), taken);
    }

    #[test]
    fn remaining_vacation_tracks_every_booking(
        total in 0_u32..60,
        bookings in prop::collection::vec(0_u32..10, 0..20),
    ) {
        let mut record = record_with(total, 0);
        for days in bookings {
            record.book_vacation(days);
            prop_assert_eq!(
                record.remaining_vacation(),
                record.vacation_total() - record.vacation_taken()
            );
        }
    }

    #[test]
    fn booking_hours_is_associative(a in hours(), b in hours()) {
        let mut split = record_with(30, 0);
        split.book_hours(a);
        split.book_hours(b);

        let mut combined = record_with(30, 0);
        combined.book_hours(a + b);

        prop_assert_eq!(split.hours_balance(), combined.hours_balance());
    }

    #[test]
    fn ensure_span_covers_each_day_once(offset in 0_i64..365, length in 0_i64..60) {
        let from = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Duration::days(offset);
        let to = from + Duration::days(length);

        let mut book = AttendanceBook::new();
        let added = book.ensure_span("1001", from, to);
        prop_assert_eq!(added as i64, length + 1);
        prop_assert_eq!(book.ensure_span("1001", from, to), 0);
        prop_assert_eq!(book.entries_for("1001", from, to).len(), added);
    }
}
