pub mod add;
pub mod calendar;
pub mod check;
pub mod daemon;
pub mod edit;
pub mod export;
pub mod list;
pub mod remove;
pub mod settings;

use anyhow::Result;
use bday_core::config::{BdayConfig, DefaultView};
use bday_core::upcoming::SortOption;

/// Plain `bday`: whichever view the config asks for.
pub fn default_view() -> Result<()> {
    match BdayConfig::load()?.default_view {
        DefaultView::List => list::run(SortOption::Date, true, None, false),
        DefaultView::Calendar => calendar::run(None),
    }
}
