use anyhow::Result;
use bday_core::error::BdayError;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::utils::today;

pub fn run(
    id: u64,
    name: Option<String>,
    date: Option<NaiveDate>,
    category: Option<String>,
) -> Result<()> {
    if name.is_none() && date.is_none() && category.is_none() {
        anyhow::bail!("Nothing to change. Pass --name, --date or --category");
    }

    let mut ctx = Context::load()?;

    let mut record = ctx
        .store
        .get(id)
        .cloned()
        .ok_or(BdayError::BirthdayNotFound(id))?;

    if let Some(name) = name {
        record.name = name;
    }
    if let Some(date) = date {
        record.birth_date = date;
    }
    if let Some(category) = category {
        record.category = category;
    }

    ctx.store.update(record, today())?;

    if let Some(updated) = ctx.store.get(id) {
        println!("{} {}", "Updated".yellow(), updated);
    }

    Ok(())
}
