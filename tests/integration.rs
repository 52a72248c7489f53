//! Integration tests for the personnel ledger.
//!
//! This test suite exercises the public API end to end:
//! - Vacation and hours booking
//! - Registry lookup and CSV import
//! - Import policies
//! - Persistence round trips
//! - Attendance and settlement with the default configuration

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

use personnel_ledger::attendance::AttendanceBook;
use personnel_ledger::config::{ConfigLoader, LedgerSettings};
use personnel_ledger::error::LedgerError;
use personnel_ledger::models::EmployeeRecord;
use personnel_ledger::registry::{EmployeeRegistry, ImportPolicy};
use personnel_ledger::settlement::settle_period;

// =============================================================================
// Test Helpers
// =============================================================================

const FIXTURE: &str = "./tests/fixtures/Mitarbeiter.csv";

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/default").expect("Failed to load config")
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
}

fn time(hour: u32, minute: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ledger-it-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// =============================================================================
// SECTION 1: Booking
// =============================================================================

#[test]
fn test_vacation_scenarios() {
    let mut record = EmployeeRecord::new("1001", "Müller", "Hans", "Vollzeit", 30);

    assert!(record.book_vacation(5));
    assert_eq!(record.remaining_vacation(), 25);

    assert!(!record.book_vacation(30));
    assert_eq!(record.remaining_vacation(), 25);
}

#[test]
fn test_hours_scenario() {
    let mut record = EmployeeRecord::new("1001", "Müller", "Hans", "Vollzeit", 30);
    record.book_hours(decimal("3.5"));
    record.book_hours(decimal("-1.0"));
    assert_eq!(record.hours_balance(), decimal("2.5"));
}

// =============================================================================
// SECTION 2: Registry Lookup and Import
// =============================================================================

#[test]
fn test_empty_registry_lookup() {
    let registry = load_config().registry();
    assert!(registry.find_employee("1001").is_none());
}

#[test]
fn test_single_row_import_lookup() {
    let mut registry = load_config().registry();
    let table = "identifier,last_name,first_name,work_model\n1001,Müller,Hans,Vollzeit\n";
    registry.load_from_table(table.as_bytes()).unwrap();

    let record = registry.find_employee("1001").expect("imported record");
    assert_eq!(record.last_name, "Müller");
    assert_eq!(record.first_name, "Hans");
    assert_eq!(record.work_model, "Vollzeit");
    assert_eq!(record.vacation_total(), 30);
}

#[test]
fn test_fixture_import_skips_invalid_rows() {
    let mut registry = load_config().registry();
    let report = registry.load_from_path(FIXTURE).unwrap();

    assert_eq!(report.loaded, 4);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].line, 4);
    assert!(registry.find_employee("00001003").is_none());

    let hans = registry.find_employee("00001001").unwrap();
    assert_eq!(hans.vacation_taken(), 5);
    assert_eq!(hans.remaining_vacation(), 25);
    assert_eq!(hans.hours_balance(), decimal("3.5"));
    assert_eq!(hans.rank.as_deref(), Some("Oberfeldwebel"));
    assert_eq!(hans.unit.as_deref(), Some("1. Zug"));

    let jonas = registry.find_employee("00001004").unwrap();
    assert_eq!(jonas.vacation_total(), 30);
    assert_eq!(jonas.hours_balance(), Decimal::ZERO);
}

#[test]
fn test_fixture_import_with_identifier_length() {
    let mut registry = EmployeeRegistry::with_settings(LedgerSettings {
        identifier_length: Some(8),
        ..LedgerSettings::default()
    });
    let report = registry.load_from_path(FIXTURE).unwrap();

    assert_eq!(report.loaded, 3);
    let lines: Vec<u64> = report.rejected.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![4, 6]);
    assert!(report.rejected[1].message.contains("8 digits"));
}

#[test]
fn test_fixture_import_abort_on_error() {
    let mut registry = EmployeeRegistry::with_settings(LedgerSettings {
        import_policy: ImportPolicy::AbortOnError,
        ..LedgerSettings::default()
    });

    match registry.load_from_path(FIXTURE) {
        Err(LedgerError::InvalidRow { line, message }) => {
            assert_eq!(line, 4);
            assert_eq!(message, "missing first_name");
        }
        other => panic!("Expected InvalidRow error, got {:?}", other),
    }
    assert!(registry.is_empty());
}

// =============================================================================
// SECTION 3: Persistence
// =============================================================================

#[test]
fn test_registry_survives_save_and_reload() {
    let dir = scratch_dir();
    let path = dir.join("Mitarbeiter.csv");

    let mut registry = load_config().registry();
    registry.load_from_path(FIXTURE).unwrap();
    let hans = registry.find_employee_mut("00001001").unwrap();
    assert!(hans.book_vacation(10));
    hans.book_hours(decimal("-1.25"));
    registry.save_to_path(&path).unwrap();

    let mut reloaded = load_config().registry();
    let report = reloaded.load_from_path(&path).unwrap();
    assert!(report.is_complete());
    assert_eq!(reloaded.identifiers(), registry.identifiers());

    let hans = reloaded.find_employee("00001001").unwrap();
    assert_eq!(hans.vacation_taken(), 15);
    assert_eq!(hans.hours_balance(), decimal("2.25"));
    assert_eq!(Some(hans), registry.find_employee("00001001"));

    std::fs::remove_dir_all(dir).unwrap();
}

// =============================================================================
// SECTION 4: Attendance and Settlement
// =============================================================================

#[test]
fn test_week_settlement_books_onto_registry_record() {
    let config = load_config();
    let mut registry = config.registry();
    registry.load_from_path(FIXTURE).unwrap();

    let mut book = AttendanceBook::new();
    book.ensure_span("00001001", date(1), date(7));
    for day in 1..=4 {
        book.set_times("00001001", date(day), time(6, 0), time(15, 0), false);
        book.set_break("00001001", date(day), 30);
    }
    // Friday: 7h target, worked 6:00-14:00 with 30 minutes break.
    book.set_times("00001001", date(5), time(6, 0), time(14, 0), false);
    book.set_break("00001001", date(5), 30);
    book.set_status("00001001", date(3), "Lehrgang", config.statuses())
        .unwrap();

    let record = registry.find_employee_mut("00001001").unwrap();
    let settlement = settle_period(
        record,
        &mut book,
        date(1),
        date(7),
        config.work_models(),
        config.statuses(),
    )
    .unwrap();

    // Mon, Tue, Thu exact; Lehrgang neutral; Friday +0.5.
    assert_eq!(settlement.hours_delta, decimal("0.5"));
    assert_eq!(
        registry.find_employee("00001001").unwrap().hours_balance(),
        decimal("4.0")
    );

    // A repeated run must not book the week again.
    let record = registry.find_employee_mut("00001001").unwrap();
    let repeated = settle_period(
        record,
        &mut book,
        date(1),
        date(7),
        config.work_models(),
        config.statuses(),
    );
    assert!(matches!(repeated, Err(LedgerError::AlreadySettled { .. })));
    assert_eq!(
        registry.find_employee("00001001").unwrap().hours_balance(),
        decimal("4.0")
    );
}

#[test]
fn test_duty_status_from_config_counts_days() {
    let config = load_config();
    let mut record = EmployeeRecord::new("1001", "Müller", "Hans", "Teilzeit", 30);

    let mut book = AttendanceBook::new();
    book.set_status("1001", date(1), "Wachdienst", config.statuses())
        .unwrap();
    book.set_status("1001", date(2), "Wachdienst", config.statuses())
        .unwrap();

    let settlement = settle_period(
        &mut record,
        &mut book,
        date(1),
        date(2),
        config.work_models(),
        config.statuses(),
    )
    .unwrap();

    assert_eq!(settlement.duty_days, 2);
    assert_eq!(settlement.days[0].target_hours, decimal("24"));
    assert_eq!(record.hours_balance(), Decimal::ZERO);
}

#[test]
fn test_attendance_survives_save_and_reload() {
    let dir = scratch_dir();
    let path = dir.join("Anwesenheit.csv");

    let mut book = AttendanceBook::new();
    book.ensure_span("00001001", date(1), date(14));
    book.set_times("00001001", date(2), time(7, 15), time(16, 45), false);
    book.save_to_path(&path).unwrap();

    let mut reloaded = AttendanceBook::new();
    assert_eq!(reloaded.load_from_path(&path).unwrap(), 14);
    assert_eq!(
        reloaded.get("00001001", date(2)).unwrap().end,
        time(16, 45)
    );
    assert_eq!(reloaded.purge("00001001"), 14);

    std::fs::remove_dir_all(dir).unwrap();
}
