//! Terminal rendering for the list and calendar views.

use bday_core::birthday::BirthdayRecord;
use bday_core::upcoming::{MonthGrid, birthdays_on};
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

use crate::utils::pluralize;

/// How a row should stand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Today,
    NextUp,
    None,
}

/// "today", "tomorrow" or "in N days"
pub fn when_label(days_until: i64) -> String {
    match days_until {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {} {}", n, pluralize("day", n)),
    }
}

pub fn render_row(record: &BirthdayRecord, today: NaiveDate, highlight: Highlight) -> String {
    let days_until = record.days_until_next(today);
    let id = format!("#{:<3}", record.id);
    let date = record.birth_date.format("%b %e").to_string();
    let when = format!(
        "{}, turns {}",
        when_label(days_until),
        record.upcoming_age(today)
    );
    let category = format!("[{}]", record.category_label());

    let name = match highlight {
        Highlight::Today => format!("🎂 {}", record.name.green().bold()),
        Highlight::NextUp => format!("⏳ {}", record.name.yellow().bold()),
        Highlight::None => format!("   {}", record.name),
    };

    format!(
        "{} {} {} ({}) {}",
        id.dimmed(),
        date,
        name,
        when,
        category.dimmed()
    )
}

const WEEKDAY_HEADER: &str = "Su Mo Tu We Th Fr Sa";

/// Month grid with birthday days marked, followed by the birthdays in it.
pub fn render_month(grid: &MonthGrid, records: &[BirthdayRecord], today: NaiveDate) -> Vec<String> {
    let mut lines = Vec::new();

    let title = grid
        .first_day()
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_default();
    lines.push(format!("{:^20}", title).bold().to_string());
    lines.push(WEEKDAY_HEADER.dimmed().to_string());

    let mut cells: Vec<String> = (0..grid.leading_blanks).map(|_| "  ".to_string()).collect();
    let mut listed = Vec::new();

    for day in grid.days() {
        let on_day = birthdays_on(records, day);
        let label = format!("{:>2}", day.day());

        let cell = if !on_day.is_empty() && day == today {
            label.green().bold().underline().to_string()
        } else if !on_day.is_empty() {
            label.magenta().bold().to_string()
        } else if day == today {
            label.underline().to_string()
        } else {
            label
        };
        cells.push(cell);

        listed.extend(on_day.into_iter().map(|r| (day, r)));
    }

    for week in cells.chunks(7) {
        lines.push(week.join(" "));
    }

    lines.push(String::new());
    if listed.is_empty() {
        lines.push("No birthdays this month".dimmed().to_string());
    } else {
        for (day, record) in listed {
            lines.push(format!(
                "{} {} {}",
                day.format("%b %e").to_string().magenta(),
                record.name,
                format!("[{}]", record.category_label()).dimmed()
            ));
        }
    }

    lines.push(String::new());
    lines.push(month_hint(grid).dimmed().to_string());

    lines
}

/// Footer naming the neighbouring months in the form `--month` takes.
fn month_hint(grid: &MonthGrid) -> String {
    let label = |g: Option<MonthGrid>| {
        g.and_then(|g| g.first_day())
            .map(|d| d.format("%Y-%m").to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    format!(
        "‹ {} · bday calendar --month YYYY-MM · {} ›",
        label(grid.previous()),
        label(grid.next())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: u64, name: &str, birth_date: NaiveDate) -> BirthdayRecord {
        BirthdayRecord {
            id,
            name: name.to_string(),
            birth_date,
            category: String::new(),
        }
    }

    #[test]
    fn test_when_label() {
        assert_eq!(when_label(0), "today");
        assert_eq!(when_label(1), "tomorrow");
        assert_eq!(when_label(7), "in 7 days");
    }

    #[test]
    fn test_render_row() {
        let row = render_row(&record(3, "Alice", date(1990, 6, 15)), date(2025, 6, 8), Highlight::None);
        assert!(row.contains("Alice"));
        assert!(row.contains("in 7 days, turns 35"));
        assert!(row.contains("[-]"));
    }

    #[test]
    fn test_render_month_lists_birthdays() {
        let records = vec![
            record(1, "Leapling", date(2000, 2, 29)),
            record(2, "Marcher", date(1990, 3, 1)),
        ];
        let grid = MonthGrid::new(2025, 2).unwrap();

        let lines = render_month(&grid, &records, date(2025, 2, 10));

        // Feb 2025 starts on a Saturday, so 28 days span 5 rows
        let week_rows = lines.iter().skip(2).take_while(|l| !l.is_empty()).count();
        assert_eq!(week_rows, 5);
        assert!(lines.iter().any(|l| l.contains("Leapling")));
        assert!(!lines.iter().any(|l| l.contains("Marcher")));
    }

    #[test]
    fn test_render_empty_month() {
        let grid = MonthGrid::new(2025, 4).unwrap();
        let lines = render_month(&grid, &[], date(2025, 2, 10));
        assert!(lines.iter().any(|l| l.contains("No birthdays this month")));
    }

    #[test]
    fn test_render_month_points_at_neighbours() {
        let lines = render_month(&MonthGrid::new(2025, 2).unwrap(), &[], date(2025, 2, 10));
        let hint = lines.last().unwrap();
        assert!(hint.contains("2025-01"));
        assert!(hint.contains("2025-03"));

        let hint = month_hint(&MonthGrid::new(2024, 12).unwrap());
        assert!(hint.starts_with("‹ 2024-11"));
        assert!(hint.ends_with("2025-01 ›"));
    }
}
