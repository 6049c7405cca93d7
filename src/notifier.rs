//! Reminder delivery for the `check` and `daemon` commands.

use bday_core::error::{BdayError, BdayResult};
use bday_core::notify::{Notifier, Reminder};
use notify_rust::Notification;

const APP_NAME: &str = "bday";

/// Shows a desktop notification per reminder.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, reminder: &Reminder) -> BdayResult<()> {
        Notification::new()
            .appname(APP_NAME)
            .summary(&reminder.title)
            .body(&reminder.body)
            .icon("x-office-calendar")
            .show()
            .map(|_| ())
            .map_err(|e| BdayError::Notify(e.to_string()))
    }
}

/// Prints reminders instead of showing them.
pub struct PrintNotifier;

impl Notifier for PrintNotifier {
    fn notify(&self, reminder: &Reminder) -> BdayResult<()> {
        println!("🔔 {} (#{})", reminder.title, reminder.id);
        Ok(())
    }
}

pub fn notifier_for(dry_run: bool) -> Box<dyn Notifier> {
    if dry_run {
        Box::new(PrintNotifier)
    } else {
        Box::new(DesktopNotifier)
    }
}
