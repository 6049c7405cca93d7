//! ICS calendar generation.

use chrono::{DateTime, Datelike, Utc};
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::birthday::BirthdayRecord;

/// Generate a VCALENDAR with one yearly all-day VEVENT per birthday.
///
/// `stamp` becomes every event's DTSTAMP.
pub fn export_ics(records: &[BirthdayRecord], stamp: DateTime<Utc>) -> String {
    let mut cal = Calendar::new();
    cal.name("Birthdays");

    let dtstamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();

    for record in records {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("bday-{}@bday", record.id));
        ics_event.summary(&format!("{}'s birthday", record.name));
        ics_event.add_property("DTSTAMP", &dtstamp);

        add_date_property(&mut ics_event, "DTSTART", record.birth_date);
        if let Some(end) = record.birth_date.succ_opt() {
            add_date_property(&mut ics_event, "DTEND", end);
        }

        ics_event.add_property("RRULE", yearly_rule(record));

        if !record.category.is_empty() {
            ics_event.add_property("CATEGORIES", &record.category);
        }

        // All-day events should not block time
        ics_event.add_property("TRANSP", "TRANSPARENT");

        cal.push(ics_event.done());
    }

    strip_ics_bloat(&cal.done().to_string())
}

/// Feb 29 repeats on the last day of February so common years get Feb 28.
fn yearly_rule(record: &BirthdayRecord) -> &'static str {
    if record.birth_date.month() == 2 && record.birth_date.day() == 29 {
        "FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=-1"
    } else {
        "FREQ=YEARLY"
    }
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: chrono::NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with BDAY
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:BDAY\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
