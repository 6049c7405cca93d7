//! Birthday records and their validation rules.

use std::fmt;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recurrence::{age_on, days_until_next, next_occurrence};

/// Names are measured in characters after trimming.
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 100;

/// Birth dates further back than this are rejected as typos.
pub const MAX_AGE_YEARS: u32 = 150;

/// A stored birthday. `id` is assigned by the store and is the only thing
/// that distinguishes twins or duplicate entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayRecord {
    pub id: u64,
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub category: String,
}

impl BirthdayRecord {
    pub fn next_occurrence(&self, today: NaiveDate) -> NaiveDate {
        next_occurrence(self.birth_date, today)
    }

    pub fn days_until_next(&self, today: NaiveDate) -> i64 {
        days_until_next(self.birth_date, today)
    }

    /// Age this person turns at their next birthday.
    pub fn upcoming_age(&self, today: NaiveDate) -> i32 {
        age_on(self.birth_date, self.next_occurrence(today))
    }

    /// Category for display; "-" when unset.
    pub fn category_label(&self) -> &str {
        if self.category.is_empty() {
            "-"
        } else {
            &self.category
        }
    }
}

impl fmt::Display for BirthdayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.birth_date.format("%Y-%m-%d"))
    }
}

/// A birthday that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBirthday {
    pub name: String,
    pub birth_date: NaiveDate,
    pub category: String,
}

impl NewBirthday {
    pub fn new(name: impl Into<String>, birth_date: NaiveDate) -> Self {
        NewBirthday {
            name: name.into(),
            birth_date,
            category: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub(crate) fn into_record(self, id: u64) -> BirthdayRecord {
        BirthdayRecord {
            id,
            name: self.name.trim().to_string(),
            birth_date: self.birth_date,
            category: self.category.trim().to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name must be at least 2 characters")]
    NameTooShort,

    #[error("Name must be less than 100 characters")]
    NameTooLong,

    #[error("Birth date cannot be in the future")]
    FutureBirthDate,

    #[error("Birth date seems invalid")]
    ImplausibleBirthDate,
}

/// Check a name and birth date before they are stored.
pub fn validate(name: &str, birth_date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    let name = name.trim();
    let len = name.chars().count();

    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if len < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort);
    }
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong);
    }
    if birth_date > today {
        return Err(ValidationError::FutureBirthDate);
    }

    let earliest = today
        .checked_sub_months(Months::new(12 * MAX_AGE_YEARS))
        .unwrap_or(NaiveDate::MIN);
    if birth_date < earliest {
        return Err(ValidationError::ImplausibleBirthDate);
    }

    Ok(())
}
