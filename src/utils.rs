use chrono::{Local, NaiveDate};

/// The user's local date. The only place the CLI reads the clock for "today".
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{s}'. Expected YYYY-MM-DD"))
}

/// Parse YYYY-MM as the first day of that month
pub fn parse_month(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| format!("Invalid month format '{s}'. Expected YYYY-MM"))
}

pub fn pluralize(word: &str, count: i64) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
