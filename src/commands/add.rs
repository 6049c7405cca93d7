use anyhow::Result;
use bday_core::birthday::NewBirthday;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::when_label;
use crate::utils::today;

pub fn run(name: String, date: NaiveDate, category: String) -> Result<()> {
    let mut ctx = Context::load()?;
    let today = today();

    let id = ctx
        .store
        .insert(NewBirthday::new(name, date).with_category(category), today)?;

    if let Some(record) = ctx.store.get(id) {
        println!(
            "{} {} (#{}), next birthday {}",
            "Added".green(),
            record.name,
            id,
            when_label(record.days_until_next(today))
        );
    }

    Ok(())
}
