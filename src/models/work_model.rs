//! Work model definitions.
//!
//! A work model is a named weekly schedule: the contractual weekly hours and
//! the target hours for each weekday. Weekends carry no target.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Rounding tolerance between weekly hours and the sum of the weekdays.
pub const WEEKLY_HOURS_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

const MAX_DAILY_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);
const MAX_WEEKLY_HOURS: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// A named weekly schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkModel {
    /// The model name employees refer to (e.g., "Vollzeit").
    pub name: String,
    /// Contractual hours per week.
    pub weekly_hours: Decimal,
    /// Target hours on Monday.
    pub monday: Decimal,
    /// Target hours on Tuesday.
    pub tuesday: Decimal,
    /// Target hours on Wednesday.
    pub wednesday: Decimal,
    /// Target hours on Thursday.
    pub thursday: Decimal,
    /// Target hours on Friday.
    pub friday: Decimal,
}

impl WorkModel {
    /// Creates a model from weekly hours and the Monday to Friday targets.
    pub fn new(name: impl Into<String>, weekly_hours: Decimal, days: [Decimal; 5]) -> Self {
        let [monday, tuesday, wednesday, thursday, friday] = days;
        Self {
            name: name.into(),
            weekly_hours,
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
        }
    }

    /// Returns the Monday to Friday targets in order.
    pub fn weekdays(&self) -> [Decimal; 5] {
        [
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
        ]
    }

    /// Returns the target hours for the weekday of `date`.
    ///
    /// # Examples
    ///
    /// ```
    /// use personnel_ledger::models::WorkModel;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let model = WorkModel::new("Vollzeit", Decimal::new(40, 0), [Decimal::new(8, 0); 5]);
    /// let thursday = NaiveDate::from_ymd_opt(2025, 9, 4).unwrap();
    /// let saturday = NaiveDate::from_ymd_opt(2025, 9, 6).unwrap();
    /// assert_eq!(model.daily_hours(thursday), Decimal::new(8, 0));
    /// assert_eq!(model.daily_hours(saturday), Decimal::ZERO);
    /// ```
    pub fn daily_hours(&self, date: NaiveDate) -> Decimal {
        match date.weekday() {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat | Weekday::Sun => Decimal::ZERO,
        }
    }

    /// Checks the name, the hour ranges, and that the weekly hours match the
    /// sum of the weekdays within [`WEEKLY_HOURS_TOLERANCE`].
    pub fn validate(&self) -> LedgerResult<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(self.invalid("name must not be empty"));
        }

        if self.weekly_hours < Decimal::ZERO || self.weekly_hours > MAX_WEEKLY_HOURS {
            return Err(self.invalid(format!(
                "weekly hours {} outside 0..={}",
                self.weekly_hours, MAX_WEEKLY_HOURS
            )));
        }

        if let Some(day) = self
            .weekdays()
            .into_iter()
            .find(|h| *h < Decimal::ZERO || *h > MAX_DAILY_HOURS)
        {
            return Err(self.invalid(format!(
                "daily hours {} outside 0..={}",
                day, MAX_DAILY_HOURS
            )));
        }

        let sum: Decimal = self.weekdays().into_iter().sum();
        if (self.weekly_hours - sum).abs() > WEEKLY_HOURS_TOLERANCE {
            return Err(self.invalid(format!(
                "weekly hours {} must equal the sum of the weekdays {}",
                self.weekly_hours, sum
            )));
        }

        Ok(())
    }

    fn invalid(&self, message: impl Into<String>) -> LedgerError {
        LedgerError::InvalidWorkModel {
            name: self.name.clone(),
            message: message.into(),
        }
    }
}

/// The set of known work models, unique by case-insensitive name.
#[derive(Debug, Clone, Default)]
pub struct WorkModelCatalog {
    models: Vec<WorkModel>,
}

impl WorkModelCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, validating every model and rejecting duplicates.
    pub fn from_models(models: impl IntoIterator<Item = WorkModel>) -> LedgerResult<Self> {
        let mut catalog = Self::new();
        for model in models {
            catalog.add(model)?;
        }
        Ok(catalog)
    }

    /// Validates and appends a model.
    pub fn add(&mut self, model: WorkModel) -> LedgerResult<()> {
        model.validate()?;
        if self.get(&model.name).is_some() {
            return Err(LedgerError::InvalidWorkModel {
                name: model.name,
                message: "a work model with this name already exists".to_string(),
            });
        }
        self.models.push(model);
        Ok(())
    }

    /// Finds a model by name, ignoring case and surrounding whitespace.
    pub fn get(&self, name: &str) -> Option<&WorkModel> {
        let wanted = name.trim().to_lowercase();
        self.models
            .iter()
            .find(|m| m.name.trim().to_lowercase() == wanted)
    }

    /// Like [`get`](Self::get), but a miss is an `UnknownWorkModel` error.
    pub fn require(&self, name: &str) -> LedgerResult<&WorkModel> {
        self.get(name).ok_or_else(|| LedgerError::UnknownWorkModel {
            name: name.to_string(),
        })
    }

    /// Iterates models in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &WorkModel> {
        self.models.iter()
    }

    /// Returns the number of models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns true if the catalog holds no models.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
