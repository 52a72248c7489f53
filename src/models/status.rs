//! Attendance statuses and their settlement rules.
//!
//! Every attendance day carries a status name ("Anwesend", "Urlaub", ...).
//! The status decides through its [`StatusRule`] how the day moves the hours
//! ledger, the overtime account and the duty-day counter.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Status assigned to generated weekday entries.
pub const STATUS_PRESENT: &str = "Anwesend";

/// Status assigned to generated weekend entries.
pub const STATUS_WEEKEND: &str = "Wochenende";

/// How an attendance day is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusRule {
    /// Net attendance counts against the daily target.
    Present,
    /// No movement at all.
    Neutral,
    /// The daily target is debited from the hours ledger.
    TimeCompensation,
    /// Only time above the daily target counts, as overtime.
    Overtime,
    /// The overtime account is reduced by the daily target.
    OvertimeReduction,
    /// One duty day is counted.
    DutyDay,
}

impl StatusRule {
    /// All rules in display order.
    pub const ALL: [StatusRule; 6] = [
        StatusRule::Present,
        StatusRule::Neutral,
        StatusRule::TimeCompensation,
        StatusRule::Overtime,
        StatusRule::OvertimeReduction,
        StatusRule::DutyDay,
    ];

    /// Returns a short plain-language description of the rule.
    pub fn description(self) -> &'static str {
        match self {
            StatusRule::Present => {
                "Counts the attendance from start to end, less any recorded break."
            }
            StatusRule::Neutral => {
                "No time is credited or debited (e.g. vacation, sick leave, weekend, holiday)."
            }
            StatusRule::TimeCompensation => "Debits the daily target from the hours ledger.",
            StatusRule::Overtime => "Only time above the daily target counts as overtime.",
            StatusRule::OvertimeReduction => "Reduces the overtime account by the daily target.",
            StatusRule::DutyDay => "Counts one duty day.",
        }
    }
}

/// A named attendance status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceStatus {
    /// The status name as it appears on attendance entries.
    pub name: String,
    /// Overrides the work model's daily target when set.
    #[serde(default)]
    pub target_hours: Option<Decimal>,
    /// The settlement rule.
    pub rule: StatusRule,
}

impl AttendanceStatus {
    /// Creates a status without a target override.
    pub fn new(name: impl Into<String>, rule: StatusRule) -> Self {
        Self {
            name: name.into(),
            target_hours: None,
            rule,
        }
    }
}

const BUILT_IN: [(&str, StatusRule); 13] = [
    (STATUS_PRESENT, StatusRule::Present),
    ("Urlaub", StatusRule::Neutral),
    ("Home Office", StatusRule::Neutral),
    ("Dienstreise", StatusRule::Neutral),
    ("Zeitausgleich", StatusRule::TimeCompensation),
    ("Mehrarbeit", StatusRule::Overtime),
    ("Abbau Mehrarbeit", StatusRule::OvertimeReduction),
    ("FvD", StatusRule::DutyDay),
    ("Krank", StatusRule::Neutral),
    ("Kindkrank", StatusRule::Neutral),
    ("Nicht mehr in Kompanie", StatusRule::Neutral),
    (STATUS_WEEKEND, StatusRule::Neutral),
    ("Feiertag", StatusRule::Neutral),
];

fn built_in_rule(name: &str) -> Option<StatusRule> {
    let wanted = name.trim().to_lowercase();
    BUILT_IN
        .iter()
        .find(|(n, _)| n.to_lowercase() == wanted)
        .map(|(_, rule)| *rule)
}

/// The set of statuses, unique by case-insensitive name.
///
/// Built-in statuses are always present: they cannot be removed and their
/// rule cannot be changed. Their target hours may be overridden.
#[derive(Debug, Clone)]
pub struct StatusCatalog {
    statuses: Vec<AttendanceStatus>,
}

impl Default for StatusCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl StatusCatalog {
    /// Creates a catalog holding only the built-in statuses.
    ///
    /// # Examples
    ///
    /// ```
    /// use personnel_ledger::models::{StatusCatalog, StatusRule};
    ///
    /// let catalog = StatusCatalog::with_defaults();
    /// assert_eq!(catalog.get("Urlaub").unwrap().rule, StatusRule::Neutral);
    /// assert_eq!(catalog.get("fvd").unwrap().rule, StatusRule::DutyDay);
    /// ```
    pub fn with_defaults() -> Self {
        Self {
            statuses: BUILT_IN
                .iter()
                .map(|(name, rule)| AttendanceStatus::new(*name, *rule))
                .collect(),
        }
    }

    /// Builds a catalog from configured statuses on top of the defaults.
    ///
    /// A configured built-in status may only set its target hours; a
    /// different rule is rejected with `ProtectedStatus`.
    pub fn from_statuses(statuses: impl IntoIterator<Item = AttendanceStatus>) -> LedgerResult<Self> {
        let mut catalog = Self::with_defaults();
        for status in statuses {
            match built_in_rule(&status.name) {
                Some(rule) if rule != status.rule => {
                    return Err(LedgerError::ProtectedStatus { name: status.name });
                }
                Some(_) => catalog.set_target_hours(&status.name, status.target_hours)?,
                None => catalog.add(status)?,
            }
        }
        Ok(catalog)
    }

    /// Appends a custom status.
    pub fn add(&mut self, status: AttendanceStatus) -> LedgerResult<()> {
        let name = status.name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidStatus {
                name: status.name.clone(),
                message: "name must not be empty".to_string(),
            });
        }
        if self.get(name).is_some() {
            return Err(LedgerError::DuplicateStatus {
                name: status.name,
            });
        }
        self.statuses.push(status);
        Ok(())
    }

    /// Removes a custom status and returns it.
    pub fn remove(&mut self, name: &str) -> LedgerResult<AttendanceStatus> {
        if built_in_rule(name).is_some() {
            return Err(LedgerError::ProtectedStatus {
                name: name.to_string(),
            });
        }
        let index = self
            .position(name)
            .ok_or_else(|| LedgerError::UnknownStatus {
                name: name.to_string(),
            })?;
        Ok(self.statuses.remove(index))
    }

    /// Sets or clears the target hours override of a status.
    pub fn set_target_hours(&mut self, name: &str, hours: Option<Decimal>) -> LedgerResult<()> {
        let index = self
            .position(name)
            .ok_or_else(|| LedgerError::UnknownStatus {
                name: name.to_string(),
            })?;
        self.statuses[index].target_hours = hours;
        Ok(())
    }

    /// Returns true if `name` is one of the built-in statuses.
    pub fn is_built_in(name: &str) -> bool {
        built_in_rule(name).is_some()
    }

    /// Finds a status by name, ignoring case and surrounding whitespace.
    pub fn get(&self, name: &str) -> Option<&AttendanceStatus> {
        self.position(name).map(|i| &self.statuses[i])
    }

    /// Like [`get`](Self::get), but a miss is an `UnknownStatus` error.
    pub fn require(&self, name: &str) -> LedgerResult<&AttendanceStatus> {
        self.get(name).ok_or_else(|| LedgerError::UnknownStatus {
            name: name.to_string(),
        })
    }

    /// Iterates statuses in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &AttendanceStatus> {
        self.statuses.iter()
    }

    /// Returns the number of statuses.
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Returns true if the catalog holds no statuses.
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.statuses
            .iter()
            .position(|s| s.name.trim().to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_contain_all_built_in_statuses() {
        let catalog = StatusCatalog::with_defaults();
        assert_eq!(catalog.len(), 13);
        assert_eq!(catalog.get(STATUS_PRESENT).unwrap().rule, StatusRule::Present);
        assert_eq!(catalog.get(STATUS_WEEKEND).unwrap().rule, StatusRule::Neutral);
        assert_eq!(
            catalog.get("Abbau Mehrarbeit").unwrap().rule,
            StatusRule::OvertimeReduction
        );
    }

    #[test]
    fn test_built_in_status_cannot_be_removed() {
        let mut catalog = StatusCatalog::with_defaults();
        match catalog.remove("Krank") {
            Err(LedgerError::ProtectedStatus { name }) => assert_eq!(name, "Krank"),
            _ => panic!("Expected ProtectedStatus error"),
        }
        assert_eq!(catalog.len(), 13);
    }

    #[test]
    fn test_custom_status_can_be_added_and_removed() {
        let mut catalog = StatusCatalog::with_defaults();
        catalog
            .add(AttendanceStatus::new("Lehrgang", StatusRule::Neutral))
            .unwrap();
        assert!(catalog.get("lehrgang").is_some());

        let removed = catalog.remove("Lehrgang").unwrap();
        assert_eq!(removed.name, "Lehrgang");
        assert!(catalog.get("Lehrgang").is_none());
    }

    #[test]
    fn test_duplicate_status_is_rejected() {
        let mut catalog = StatusCatalog::with_defaults();
        let result = catalog.add(AttendanceStatus::new("urlaub", StatusRule::Present));
        assert!(matches!(result, Err(LedgerError::DuplicateStatus { .. })));
    }

    #[test]
    fn test_from_statuses_rejects_changed_built_in_rule() {
        let result =
            StatusCatalog::from_statuses([AttendanceStatus::new("Urlaub", StatusRule::Present)]);
        assert!(matches!(result, Err(LedgerError::ProtectedStatus { .. })));
    }

    #[test]
    fn test_from_statuses_applies_built_in_target_hours() {
        let mut status = AttendanceStatus::new("Zeitausgleich", StatusRule::TimeCompensation);
        status.target_hours = Some(Decimal::new(8, 0));

        let catalog = StatusCatalog::from_statuses([status]).unwrap();
        assert_eq!(
            catalog.get("Zeitausgleich").unwrap().target_hours,
            Some(Decimal::new(8, 0))
        );
        assert_eq!(catalog.len(), 13);
    }

    #[test]
    fn test_rule_serialization() {
        let rule: StatusRule = serde_yaml::from_str("overtime_reduction").unwrap();
        assert_eq!(rule, StatusRule::OvertimeReduction);
        assert!(serde_yaml::from_str::<StatusRule>("fix_soll").is_err());
    }

    #[test]
    fn test_every_rule_has_a_description() {
        for rule in StatusRule::ALL {
            assert!(!rule.description().is_empty());
        }
    }

    #[test]
    fn test_present_description_matches_settlement() {
        // Attendance counts with its breaks unless a break is recorded.
        let description = StatusRule::Present.description();
        assert!(description.contains("start to end"));
        assert!(description.contains("recorded break"));
    }
}
