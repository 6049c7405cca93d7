use anyhow::Result;
use bday_core::notify::{CheckSummary, run_check};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::notifier::notifier_for;
use crate::utils::today;

pub fn run(dry_run: bool) -> Result<()> {
    let summary = check_once(today(), dry_run)?;

    if summary.due == 0 {
        println!("{}", "No reminders today".dimmed());
    } else if summary.failed > 0 {
        anyhow::bail!(
            "{} of {} reminders could not be delivered",
            summary.failed,
            summary.due
        );
    }

    Ok(())
}

/// One full check against freshly loaded config and store.
pub fn check_once(today: NaiveDate, dry_run: bool) -> Result<CheckSummary> {
    let ctx = Context::load()?;
    let notifier = notifier_for(dry_run);

    let summary = run_check(&ctx.store, &ctx.config, today, notifier.as_ref())?;

    tracing::info!(
        checked = summary.checked,
        due = summary.due,
        delivered = summary.delivered,
        failed = summary.failed,
        "birthday check finished for {today}"
    );

    Ok(summary)
}
