use std::path::PathBuf;

use anyhow::{Context as _, Result};
use bday_core::ics::export_ics;
use chrono::Utc;
use owo_colors::OwoColorize;

use crate::context::Context;

pub fn run(output: Option<PathBuf>) -> Result<()> {
    let ctx = Context::load()?;
    let records = ctx.store.all();

    let ics = export_ics(&records, Utc::now());

    match output {
        Some(path) => {
            std::fs::write(&path, ics)
                .with_context(|| format!("Could not write {}", path.display()))?;
            println!(
                "{} {} birthdays to {}",
                "Exported".green(),
                records.len(),
                path.display()
            );
        }
        None => print!("{ics}"),
    }

    Ok(())
}
