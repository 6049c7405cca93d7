//! Reminder eligibility and the daily reminder check.
//!
//! A birthday is due for a reminder when it is today (`notify_day_of`) or
//! exactly a week away (`notify_week_before`). Delivery is left to a
//! [`Notifier`] supplied by the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::birthday::BirthdayRecord;
use crate::config::PreferenceSource;
use crate::error::BdayResult;
use crate::store::BirthdaySource;

/// Days-until values that can trigger a reminder.
pub const DAY_OF: i64 = 0;
pub const WEEK_BEFORE: i64 = 7;

fn default_true() -> bool {
    true
}

/// Which reminders the user wants. Both are on unless switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    #[serde(default = "default_true")]
    pub notify_day_of: bool,

    #[serde(default = "default_true")]
    pub notify_week_before: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        NotificationPreferences {
            notify_day_of: true,
            notify_week_before: true,
        }
    }
}

impl NotificationPreferences {
    /// Whether a birthday `days_until` days away should fire today.
    pub fn wants(&self, days_until: i64) -> bool {
        (days_until == DAY_OF && self.notify_day_of)
            || (days_until == WEEK_BEFORE && self.notify_week_before)
    }
}

/// Records due for a reminder on `today`, paired with their day count.
///
/// Input order is kept and nothing is deduplicated: twins sharing a birth
/// date each get their own entry.
pub fn eligible_for_notification(
    records: &[BirthdayRecord],
    prefs: NotificationPreferences,
    today: NaiveDate,
) -> Vec<(BirthdayRecord, i64)> {
    records
        .iter()
        .filter_map(|record| {
            let days_until = record.days_until_next(today);
            prefs.wants(days_until).then(|| (record.clone(), days_until))
        })
        .collect()
}

/// The content of a single reminder, keyed by the record it is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: u64,
    pub name: String,
    pub days_until: i64,
    pub title: String,
    pub body: String,
}

impl Reminder {
    pub fn new(record: &BirthdayRecord, days_until: i64) -> Self {
        Reminder {
            id: record.id,
            name: record.name.clone(),
            days_until,
            title: reminder_title(&record.name, days_until),
            body: "Don't forget to wish them a happy birthday!".to_string(),
        }
    }
}

fn reminder_title(name: &str, days_until: i64) -> String {
    match days_until {
        0 => format!("{name}'s birthday is today!"),
        1 => format!("{name}'s birthday is tomorrow"),
        n => format!("{name}'s birthday is in {n} days"),
    }
}

/// Delivers reminders (desktop notification, stdout, ...).
pub trait Notifier {
    fn notify(&self, reminder: &Reminder) -> BdayResult<()>;
}

/// Outcome of one reminder check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub checked: usize,
    pub due: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Evaluate `records` and hand each due reminder to `notifier`.
///
/// A delivery failure is logged and counted; it does not stop the remaining
/// reminders from going out.
pub fn check_and_notify(
    records: &[BirthdayRecord],
    prefs: NotificationPreferences,
    today: NaiveDate,
    notifier: &dyn Notifier,
) -> CheckSummary {
    let due = eligible_for_notification(records, prefs, today);

    let mut summary = CheckSummary {
        checked: records.len(),
        due: due.len(),
        ..CheckSummary::default()
    };

    for (record, days_until) in &due {
        let reminder = Reminder::new(record, *days_until);
        tracing::debug!(id = record.id, days_until, "sending reminder for {}", record.name);

        match notifier.notify(&reminder) {
            Ok(()) => summary.delivered += 1,
            Err(e) => {
                tracing::warn!(id = record.id, "failed to deliver reminder for {}: {e}", record.name);
                summary.failed += 1;
            }
        }
    }

    summary
}

/// Load records and preferences, then run [`check_and_notify`].
///
/// Errors here come from loading; callers retry the whole run.
pub fn run_check(
    source: &dyn BirthdaySource,
    preferences: &dyn PreferenceSource,
    today: NaiveDate,
    notifier: &dyn Notifier,
) -> BdayResult<CheckSummary> {
    let prefs = preferences.notification_preferences()?;
    let records = source.all_birthdays()?;

    tracing::debug!("checking {} birthdays for {today}", records.len());

    Ok(check_and_notify(&records, prefs, today, notifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BdayError;
    use std::cell::RefCell;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: u64, name: &str, birth_date: NaiveDate) -> BirthdayRecord {
        BirthdayRecord {
            id,
            name: name.to_string(),
            birth_date,
            category: "Friend".to_string(),
        }
    }

    fn prefs(notify_day_of: bool, notify_week_before: bool) -> NotificationPreferences {
        NotificationPreferences {
            notify_day_of,
            notify_week_before,
        }
    }

    #[derive(Default)]
    struct Recording {
        sent: RefCell<Vec<Reminder>>,
        fail_for: Option<u64>,
    }

    impl Notifier for Recording {
        fn notify(&self, reminder: &Reminder) -> BdayResult<()> {
            if self.fail_for == Some(reminder.id) {
                return Err(BdayError::Notify("tray unavailable".into()));
            }
            self.sent.borrow_mut().push(reminder.clone());
            Ok(())
        }
    }

    struct Fixed(Vec<BirthdayRecord>, NotificationPreferences);

    impl BirthdaySource for Fixed {
        fn all_birthdays(&self) -> BdayResult<Vec<BirthdayRecord>> {
            Ok(self.0.clone())
        }
    }

    impl PreferenceSource for Fixed {
        fn notification_preferences(&self) -> BdayResult<NotificationPreferences> {
            Ok(self.1)
        }
    }

    struct Broken;

    impl BirthdaySource for Broken {
        fn all_birthdays(&self) -> BdayResult<Vec<BirthdayRecord>> {
            Err(BdayError::Store("disk on fire".into()))
        }
    }

    #[test]
    fn test_defaults_enable_both() {
        assert_eq!(NotificationPreferences::default(), prefs(true, true));
    }

    #[test]
    fn test_day_of_only() {
        let today = date(2025, 4, 10);
        let records = vec![record(1, "Alice", date(2000, 4, 10))];

        let result = eligible_for_notification(&records, prefs(true, false), today);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].0.name, "Alice");
        assert_eq!(result[0].1, 0);
    }

    #[test]
    fn test_week_before_only() {
        let today = date(2025, 4, 10);
        let records = vec![record(1, "Bob", date(1995, 4, 17))];

        let result = eligible_for_notification(&records, prefs(false, true), today);

        assert_eq!(result, vec![(records[0].clone(), 7)]);
        assert!(eligible_for_notification(&records, prefs(true, false), today).is_empty());
    }

    #[test]
    fn test_both_disabled_is_empty() {
        let today = date(2025, 4, 10);
        let records = vec![record(1, "Alice", date(2000, 4, 10)), record(2, "Bob", date(1995, 4, 17))];

        assert!(eligible_for_notification(&records, prefs(false, false), today).is_empty());
    }

    #[test]
    fn test_other_day_counts_never_fire() {
        let today = date(2025, 4, 10);
        let records = vec![
            record(1, "Tomorrow", date(2000, 4, 11)),
            record(2, "SixDays", date(2000, 4, 16)),
            record(3, "EightDays", date(2000, 4, 18)),
            record(4, "Yesterday", date(2000, 4, 9)),
        ];

        assert!(eligible_for_notification(&records, prefs(true, true), today).is_empty());
    }

    #[test]
    fn test_week_before_across_new_year() {
        let today = date(2024, 12, 31);
        let records = vec![record(1, "Janet", date(1985, 1, 7))];

        let result = eligible_for_notification(&records, prefs(false, true), today);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].1, 7);
    }

    #[test]
    fn test_leap_day_week_before_in_common_year() {
        let records = vec![record(1, "Leapling", date(2000, 2, 29))];

        let result = eligible_for_notification(&records, prefs(false, true), date(2025, 2, 21));
        assert_eq!(result.len(), 1);

        let result = eligible_for_notification(&records, prefs(true, false), date(2025, 2, 28));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_twins_each_get_an_entry_in_input_order() {
        let today = date(2025, 6, 15);
        let birth = date(1995, 6, 15);
        let records = vec![
            record(3, "Charlie", birth),
            record(1, "Alice", birth),
            record(2, "Alice", birth),
        ];

        let result = eligible_for_notification(&records, prefs(true, false), today);

        assert_eq!(result.len(), 3);
        let ids: Vec<u64> = result.iter().map(|(r, _)| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_mixed_day_of_and_week_before() {
        let today = date(2025, 6, 8);
        let records = vec![
            record(1, "Later", date(1990, 6, 15)),
            record(2, "Now", date(1990, 6, 8)),
        ];

        let result = eligible_for_notification(&records, prefs(true, true), today);

        let pairs: Vec<(u64, i64)> = result.iter().map(|(r, d)| (r.id, *d)).collect();
        assert_eq!(pairs, vec![(1, 7), (2, 0)]);
    }

    #[test]
    fn test_is_idempotent() {
        let today = date(2025, 6, 8);
        let records = vec![record(1, "A1", date(1990, 6, 8)), record(2, "B2", date(1990, 6, 15))];

        let first = eligible_for_notification(&records, prefs(true, true), today);
        let second = eligible_for_notification(&records, prefs(true, true), today);

        assert_eq!(first, second);
    }

    #[test]
    fn test_reminder_titles() {
        let r = record(9, "Dana", date(1990, 1, 1));
        assert_eq!(Reminder::new(&r, 0).title, "Dana's birthday is today!");
        assert_eq!(Reminder::new(&r, 1).title, "Dana's birthday is tomorrow");
        assert_eq!(Reminder::new(&r, 7).title, "Dana's birthday is in 7 days");
        assert_eq!(Reminder::new(&r, 7).id, 9);
    }

    #[test]
    fn test_check_and_notify_counts_failures_without_aborting() {
        let today = date(2025, 6, 15);
        let records = vec![
            record(1, "Alice", date(1995, 6, 15)),
            record(2, "Bob", date(1995, 6, 15)),
            record(3, "Carol", date(1995, 6, 22)),
            record(4, "Dave", date(1995, 1, 1)),
        ];
        let notifier = Recording {
            fail_for: Some(2),
            ..Recording::default()
        };

        let summary = check_and_notify(&records, prefs(true, true), today, &notifier);

        assert_eq!(
            summary,
            CheckSummary {
                checked: 4,
                due: 3,
                delivered: 2,
                failed: 1
            }
        );
        let sent: Vec<u64> = notifier.sent.borrow().iter().map(|r| r.id).collect();
        assert_eq!(sent, vec![1, 3]);
    }

    #[test]
    fn test_run_check_uses_sources() {
        let source = Fixed(vec![record(1, "Alice", date(1995, 6, 15))], prefs(true, false));
        let notifier = Recording::default();

        let summary = run_check(&source, &source, date(2025, 6, 15), &notifier).unwrap();

        assert_eq!(summary.delivered, 1);
        assert_eq!(notifier.sent.borrow()[0].title, "Alice's birthday is today!");
    }

    #[test]
    fn test_run_check_propagates_load_errors() {
        let prefs_source = Fixed(vec![], prefs(true, true));
        let notifier = Recording::default();

        let result = run_check(&Broken, &prefs_source, date(2025, 6, 15), &notifier);

        assert!(matches!(result, Err(BdayError::Store(_))));
        assert!(notifier.sent.borrow().is_empty());
    }
}
