//! Yearly recurrence of birth dates.
//!
//! A birth date recurs on the same month/day every year. February 29 has no
//! counterpart in common years; there it falls on February 28.
//!
//! Every function takes the reference date explicitly so results never
//! depend on the wall clock.

use chrono::{Datelike, NaiveDate};

/// The anniversary of `birth_date` within `year`.
///
/// Feb 29 maps to Feb 28 when `year` is not a leap year. Returns `None` only
/// when `year` is outside chrono's representable range.
pub fn anniversary_in(birth_date: NaiveDate, year: i32) -> Option<NaiveDate> {
    birth_date
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28).filter(|_| is_leap_day(birth_date)))
}

/// Next anniversary of `birth_date` on or after `today`.
pub fn next_occurrence(birth_date: NaiveDate, today: NaiveDate) -> NaiveDate {
    let this_year = anniversary_in(birth_date, today.year());

    match this_year {
        Some(date) if date >= today => date,
        // Past this year's anniversary: roll over into next year. At the very
        // end of chrono's range there is no next year; clamp.
        _ => anniversary_in(birth_date, today.year() + 1).unwrap_or(NaiveDate::MAX),
    }
}

/// Whole days from `today` until the next anniversary. `0` means today.
pub fn days_until_next(birth_date: NaiveDate, today: NaiveDate) -> i64 {
    (next_occurrence(birth_date, today) - today).num_days()
}

/// Age reached at the anniversary falling in `date`'s year.
pub fn age_on(birth_date: NaiveDate, date: NaiveDate) -> i32 {
    date.year() - birth_date.year()
}

fn is_leap_day(date: NaiveDate) -> bool {
    date.month() == 2 && date.day() == 29
}
