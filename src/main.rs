mod commands;
mod context;
mod logging;
mod notifier;
mod render;
mod utils;

use anyhow::Result;
use bday_core::config::DefaultView;
use bday_core::upcoming::SortOption;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::utils::{parse_date, parse_month};

#[derive(Parser)]
#[command(name = "bday")]
#[command(about = "Keep track of birthdays and get reminded before they happen")]
struct Cli {
    /// Log what bday is doing (to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a birthday
    Add {
        name: String,

        /// Birth date (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        /// Category, e.g. "Family" or "Work"
        #[arg(short, long, default_value = "")]
        category: String,
    },
    /// Change a stored birthday
    Edit {
        id: u64,

        #[arg(long)]
        name: Option<String>,

        /// Birth date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a birthday
    Remove {
        id: u64,

        /// Don't ask for confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// List birthdays
    List {
        /// Sort by date (next occurrence), name or category
        #[arg(short, long, default_value_t = SortOption::Date)]
        sort: SortOption,

        /// Reverse the sort order
        #[arg(long)]
        desc: bool,

        /// Only show names containing this text
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show a month calendar with birthdays marked
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long, value_parser = parse_month)]
        month: Option<NaiveDate>,
    },
    /// Send today's reminders
    Check {
        /// Print reminders instead of showing desktop notifications
        #[arg(long)]
        dry_run: bool,
    },
    /// Run the reminder check every day at the configured time
    Daemon,
    /// Show or change preferences
    Settings {
        /// Remind on the day itself (true/false)
        #[arg(long)]
        day_of: Option<bool>,

        /// Remind one week ahead (true/false)
        #[arg(long)]
        week_before: Option<bool>,

        /// View shown by plain `bday` (list or calendar)
        #[arg(long)]
        view: Option<DefaultView>,

        /// Time of the daily check (HH:MM)
        #[arg(long)]
        at: Option<String>,
    },
    /// Export all birthdays as an .ics calendar
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let Some(command) = cli.command else {
        return commands::default_view();
    };

    match command {
        Commands::Add {
            name,
            date,
            category,
        } => commands::add::run(name, date, category),
        Commands::Edit {
            id,
            name,
            date,
            category,
        } => commands::edit::run(id, name, date, category),
        Commands::Remove { id, force } => commands::remove::run(id, force),
        Commands::List {
            sort,
            desc,
            search,
            json,
        } => commands::list::run(sort, !desc, search.as_deref(), json),
        Commands::Calendar { month } => commands::calendar::run(month),
        Commands::Check { dry_run } => commands::check::run(dry_run),
        Commands::Daemon => commands::daemon::run().await,
        Commands::Settings {
            day_of,
            week_before,
            view,
            at,
        } => commands::settings::run(day_of, week_before, view, at),
        Commands::Export { output } => commands::export::run(output),
    }
}
