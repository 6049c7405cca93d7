use anyhow::Result;
use bday_core::birthday::BirthdayRecord;
use bday_core::upcoming::{SortOption, is_today, next_upcoming, search, sort_records};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::context::Context;
use crate::render::{Highlight, render_row};
use crate::utils::today;

#[derive(Serialize)]
struct ListEntry<'a> {
    #[serde(flatten)]
    record: &'a BirthdayRecord,
    next_occurrence: NaiveDate,
    days_until: i64,
}

pub fn run(sort: SortOption, ascending: bool, query: Option<&str>, json: bool) -> Result<()> {
    // Machine consumers get `[]` rather than the empty-store hint
    let ctx = if json {
        Context::load()?
    } else {
        Context::load_nonempty()?
    };
    let today = today();

    let all = ctx.store.all();
    let mut records: Vec<BirthdayRecord> = search(&all, query.unwrap_or_default())
        .into_iter()
        .cloned()
        .collect();
    sort_records(&mut records, sort, ascending, today);

    if json {
        println!("{}", to_json(&records, today)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{}", "No matching birthdays".dimmed());
        return Ok(());
    }

    let next_id = next_upcoming(&records, today).map(|r| r.id);

    for record in &records {
        let highlight = if is_today(record.birth_date, today) {
            Highlight::Today
        } else if Some(record.id) == next_id {
            Highlight::NextUp
        } else {
            Highlight::None
        };
        println!("{}", render_row(record, today, highlight));
    }

    Ok(())
}

fn to_json(records: &[BirthdayRecord], today: NaiveDate) -> Result<String> {
    let entries: Vec<ListEntry> = records
        .iter()
        .map(|record| ListEntry {
            record,
            next_occurrence: record.next_occurrence(today),
            days_until: record.days_until_next(today),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&entries)?)
}
