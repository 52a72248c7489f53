//! Attendance entry model.
//!
//! One entry per employee and calendar day, carrying the status name and the
//! optional start and end of the working day.

use std::fmt;

use chrono::{NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The attendance of one employee on one day.
///
/// Tables written by the legacy tool use German headers (`Personalnummer`,
/// `Datum`, `Status`, `Anfang`, `Ende`); those are accepted on input. Times
/// are read as `HH:MM` or `HH:MM:SS` and written as `HH:MM`. Empty cells read
/// as absent times, a zero break and an unsettled day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// The employee identifier.
    #[serde(alias = "Personalnummer")]
    pub identifier: String,
    /// The calendar day.
    #[serde(alias = "Datum")]
    pub date: NaiveDate,
    /// The status name (see [`StatusCatalog`](crate::models::StatusCatalog)).
    #[serde(default, alias = "Status")]
    pub status: String,
    /// Start of the working day.
    #[serde(
        default,
        alias = "Anfang",
        serialize_with = "serialize_time",
        deserialize_with = "deserialize_time"
    )]
    pub start: Option<NaiveTime>,
    /// End of the working day.
    #[serde(
        default,
        alias = "Ende",
        serialize_with = "serialize_time",
        deserialize_with = "deserialize_time"
    )]
    pub end: Option<NaiveTime>,
    /// Unpaid break in minutes.
    #[serde(default, deserialize_with = "deserialize_minutes")]
    pub break_minutes: u32,
    /// Whether the day has been booked onto the hours ledger.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub settled: bool,
}

impl AttendanceEntry {
    /// Creates an entry with a status and no times.
    pub fn new(identifier: impl Into<String>, date: NaiveDate, status: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            date,
            status: status.into(),
            start: None,
            end: None,
            break_minutes: 0,
            settled: false,
        }
    }

    /// Returns the net hours worked: end minus start minus the break.
    ///
    /// Missing times, an end before the start, or a break longer than the
    /// span all yield zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use personnel_ledger::models::AttendanceEntry;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let mut entry = AttendanceEntry::new("1001", NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(), "Anwesend");
    /// entry.start = NaiveTime::from_hms_opt(6, 30, 0);
    /// entry.end = NaiveTime::from_hms_opt(15, 30, 0);
    /// entry.break_minutes = 30;
    /// assert_eq!(entry.worked_hours(), Decimal::new(85, 1)); // 8.5
    /// ```
    pub fn worked_hours(&self) -> Decimal {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Decimal::ZERO;
        };

        let worked_minutes = (end - start).num_minutes() - i64::from(self.break_minutes);
        if worked_minutes <= 0 {
            return Decimal::ZERO;
        }

        Decimal::new(worked_minutes, 0) / Decimal::new(60, 0)
    }
}

fn serialize_time<S: Serializer>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error> {
    match time {
        Some(t) if t.second() == 0 => serializer.collect_str(&t.format("%H:%M")),
        Some(t) => serializer.collect_str(&t.format("%H:%M:%S")),
        None => serializer.serialize_none(),
    }
}

fn deserialize_time<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveTime>, D::Error> {
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map(Some)
        .map_err(|_| de::Error::custom(format!("invalid time '{}'", text)))
}

/// Accepts a number, a numeric string, an empty cell or null.
fn deserialize_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    struct MinutesVisitor;

    impl<'de> Visitor<'de> for MinutesVisitor {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative number of minutes")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("break of {} minutes is too long", v)))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("invalid break of {} minutes", v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(0);
            }
            v.parse()
                .map_err(|_| E::custom(format!("invalid break_minutes '{}'", v)))
        }

        fn visit_unit<E: de::Error>(self) -> Result<u32, E> {
            Ok(0)
        }

        fn visit_none<E: de::Error>(self) -> Result<u32, E> {
            Ok(0)
        }
    }

    deserializer.deserialize_any(MinutesVisitor)
}

/// Accepts a boolean, `true`/`false`/`1`/`0` text, an empty cell or null.
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a boolean flag")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::custom(format!("invalid flag {}", v))),
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            match v.trim() {
                "" | "0" | "false" => Ok(false),
                "1" | "true" => Ok(true),
                other => Err(E::custom(format!("invalid flag '{}'", other))),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_none<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}
