//! ICS export.
//!
//! Birthdays are written as all-day events that repeat yearly, so any
//! calendar application can show them.

mod generate;

pub use generate::export_ics;
