use anyhow::Result;
use bday_core::config::{BdayConfig, DefaultView};
use owo_colors::OwoColorize;

pub fn run(
    day_of: Option<bool>,
    week_before: Option<bool>,
    view: Option<DefaultView>,
    at: Option<String>,
) -> Result<()> {
    let mut config = BdayConfig::load()?;
    let changed = day_of.is_some() || week_before.is_some() || view.is_some() || at.is_some();

    if let Some(day_of) = day_of {
        config.notify_day_of = day_of;
    }
    if let Some(week_before) = week_before {
        config.notify_week_before = week_before;
    }
    if let Some(view) = view {
        config.default_view = view;
    }
    if let Some(at) = at {
        config.notify_at = at;
        // Reject before saving
        config.notify_time()?;
    }

    if changed {
        config.save()?;
        println!("{}", "Settings saved".green());
    }

    println!("Remind on the day:    {}", on_off(config.notify_day_of));
    println!("Remind a week before: {}", on_off(config.notify_week_before));
    println!("Daily check at:       {}", config.notify_at);
    println!("Default view:         {}", config.default_view);
    println!(
        "{}",
        format!("Config: {}", BdayConfig::config_path()?.display()).dimmed()
    );

    Ok(())
}

fn on_off(enabled: bool) -> String {
    if enabled {
        "on".green().to_string()
    } else {
        "off".red().to_string()
    }
}
