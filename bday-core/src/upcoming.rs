//! Queries behind the list and calendar views.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::birthday::BirthdayRecord;
use crate::recurrence::{anniversary_in, days_until_next};

/// Whether the anniversary of `birth_date` falls on `today`.
pub fn is_today(birth_date: NaiveDate, today: NaiveDate) -> bool {
    days_until_next(birth_date, today) == 0
}

/// The birthday coming up soonest. Ties go to the earliest record in `records`.
pub fn next_upcoming(records: &[BirthdayRecord], today: NaiveDate) -> Option<&BirthdayRecord> {
    records.iter().reduce(|best, candidate| {
        if candidate.days_until_next(today) < best.days_until_next(today) {
            candidate
        } else {
            best
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// By next occurrence.
    #[default]
    Date,
    Name,
    Category,
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(SortOption::Date),
            "name" => Ok(SortOption::Name),
            "category" => Ok(SortOption::Category),
            other => Err(format!(
                "Unknown sort option '{other}'. Expected date, name or category"
            )),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortOption::Date => "date",
            SortOption::Name => "name",
            SortOption::Category => "category",
        };
        f.write_str(s)
    }
}

/// Sort in place. Sorting is stable; descending is the exact reverse of
/// ascending.
pub fn sort_records(
    records: &mut [BirthdayRecord],
    option: SortOption,
    ascending: bool,
    today: NaiveDate,
) {
    match option {
        SortOption::Date => records.sort_by_key(|r| r.next_occurrence(today)),
        SortOption::Name => records.sort_by(|a, b| a.name.cmp(&b.name)),
        SortOption::Category => records.sort_by(|a, b| a.category.cmp(&b.category)),
    }

    if !ascending {
        records.reverse();
    }
}

/// Case-insensitive name search. Surrounding whitespace in the query is
/// ignored, so a blank query matches everything.
pub fn search<'a>(records: &'a [BirthdayRecord], query: &str) -> Vec<&'a BirthdayRecord> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return records.iter().collect();
    }

    records
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&query))
        .collect()
}

/// Records whose anniversary lands on `date` (Feb 29 birthdays land on
/// Feb 28 in common years).
pub fn birthdays_on(records: &[BirthdayRecord], date: NaiveDate) -> Vec<&BirthdayRecord> {
    records
        .iter()
        .filter(|r| anniversary_in(r.birth_date, date.year()) == Some(date))
        .collect()
}

/// Layout of one calendar month with weeks starting on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Blank cells before the 1st.
    pub leading_blanks: u32,
    pub days_in_month: u32,
}

impl MonthGrid {
    /// Returns `None` for a month outside 1..=12 or an unrepresentable year.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };

        Some(MonthGrid {
            year,
            month,
            leading_blanks: first.weekday().number_from_monday() % 7,
            days_in_month: (next_first - first).num_days() as u32,
        })
    }

    pub fn containing(date: NaiveDate) -> Option<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.days_in_month).filter_map(|d| NaiveDate::from_ymd_opt(self.year, self.month, d))
    }

    pub fn previous(&self) -> Option<Self> {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn next(&self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }
}
