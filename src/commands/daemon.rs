use std::time::Duration;

use anyhow::Result;
use bday_core::config::BdayConfig;
use bday_core::error::BdayResult;
use bday_core::notify::CheckSummary;
use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime};

use super::check::check_once;
use crate::utils::today;

/// Attempts per daily check before giving up until tomorrow.
const MAX_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_secs(30);

pub async fn run() -> Result<()> {
    let mut last_run: Option<NaiveDate> = None;
    let mut at = BdayConfig::default_notify_time();

    println!("bday daemon started (Ctrl-C to stop)");

    loop {
        // Re-read every cycle so `bday settings --at` takes effect without a restart
        at = resolve_notify_time(BdayConfig::load().and_then(|c| c.notify_time()), at);
        let now = Local::now().naive_local();
        let next = next_run(now, at, last_run);
        let delay = (next - now).to_std().unwrap_or(Duration::ZERO);

        tracing::info!("next birthday check at {next}");

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = tokio::signal::ctrl_c() => {
                println!("Stopping bday daemon");
                return Ok(());
            }
        }

        let today = today();
        match check_with_retry(|| check_once(today, false), MAX_ATTEMPTS, RETRY_BACKOFF).await {
            Ok(summary) => tracing::info!(
                "{today}: {} of {} reminders delivered",
                summary.delivered,
                summary.due
            ),
            Err(e) => tracing::error!(
                "{today}: birthday check failed after {MAX_ATTEMPTS} attempts: {e:#}"
            ),
        }
        last_run = Some(today);
    }
}

/// The configured check time, or `last_good` when the config can't be used.
fn resolve_notify_time(loaded: BdayResult<NaiveTime>, last_good: NaiveTime) -> NaiveTime {
    match loaded {
        Ok(at) => at,
        Err(e) => {
            tracing::warn!("keeping check time {}: {e}", last_good.format("%H:%M"));
            last_good
        }
    }
}

/// When the next daily check should happen.
///
/// Today's slot is used if it is still ahead and today has not run yet;
/// otherwise tomorrow's. Starting after the slot skips today.
fn next_run(now: NaiveDateTime, at: NaiveTime, last_run: Option<NaiveDate>) -> NaiveDateTime {
    let slot = now.date().and_time(at);

    if slot < now || last_run == Some(now.date()) {
        slot.checked_add_days(Days::new(1)).unwrap_or(NaiveDateTime::MAX)
    } else {
        slot
    }
}

/// Run `attempt` until it succeeds, up to `max_attempts` times, sleeping
/// `backoff * n` after the n-th failure.
async fn check_with_retry<F>(
    mut attempt: F,
    max_attempts: u32,
    backoff: Duration,
) -> Result<CheckSummary>
where
    F: FnMut() -> Result<CheckSummary>,
{
    let mut tries = 1;

    loop {
        match attempt() {
            Ok(summary) => return Ok(summary),
            Err(e) if tries < max_attempts => {
                tracing::warn!("birthday check failed (attempt {tries}/{max_attempts}): {e:#}");
                tokio::time::sleep(backoff * tries).await;
                tries += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
