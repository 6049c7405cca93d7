use anyhow::Result;
use bday_core::error::BdayError;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::context::Context;

pub fn run(id: u64, force: bool) -> Result<()> {
    let mut ctx = Context::load()?;

    let record = ctx.store.get(id).ok_or(BdayError::BirthdayNotFound(id))?;

    // Confirm unless --force
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {record}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Nothing deleted".dimmed());
            return Ok(());
        }
    }

    let removed = ctx.store.delete(id)?;
    println!("{} {}", "Deleted".red(), removed);

    Ok(())
}
