use anyhow::Result;
use bday_core::upcoming::MonthGrid;
use chrono::NaiveDate;

use crate::context::Context;
use crate::render::render_month;
use crate::utils::today;

pub fn run(month: Option<NaiveDate>) -> Result<()> {
    let ctx = Context::load()?;
    let today = today();

    let shown = month.unwrap_or(today);
    let grid = MonthGrid::containing(shown)
        .ok_or_else(|| anyhow::anyhow!("Cannot show a calendar for {}", shown.format("%Y-%m")))?;

    for line in render_month(&grid, &ctx.store.all(), today) {
        println!("{line}");
    }

    Ok(())
}
