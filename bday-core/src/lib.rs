//! Core library for bday.
//!
//! - `recurrence`: next anniversary of a birth date and the days until it
//! - `notify`: which birthdays are due for a reminder, and running the check
//! - `upcoming`: queries behind the list and calendar views
//! - `store` / `config`: the birthdays file and user preferences
//! - `ics`: iCalendar export
//!
//! Nothing in here reads the clock; "today" is always passed in.

pub mod birthday;
pub mod config;
pub mod error;
pub mod ics;
pub mod notify;
pub mod recurrence;
pub mod store;
pub mod upcoming;

pub use birthday::{BirthdayRecord, NewBirthday, ValidationError};
pub use error::{BdayError, BdayResult};
pub use notify::{NotificationPreferences, eligible_for_notification};
pub use recurrence::{days_until_next, next_occurrence};
