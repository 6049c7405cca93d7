//! Global bday configuration and reminder preferences.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveTime;
use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{BdayError, BdayResult};
use crate::notify::NotificationPreferences;

static DEFAULT_DATA_DIR: &str = "~/.local/share/bday";
static DEFAULT_NOTIFY_AT: &str = "09:00";
static BIRTHDAYS_FILE: &str = "birthdays.toml";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_notify_at() -> String {
    DEFAULT_NOTIFY_AT.to_string()
}

fn default_true() -> bool {
    true
}

/// Read access to the user's reminder toggles.
pub trait PreferenceSource {
    fn notification_preferences(&self) -> BdayResult<NotificationPreferences>;
}

/// What `bday` shows when run without a subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultView {
    #[default]
    List,
    Calendar,
}

impl FromStr for DefaultView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "list" => Ok(DefaultView::List),
            "calendar" => Ok(DefaultView::Calendar),
            other => Err(format!("Unknown view '{other}'. Expected list or calendar")),
        }
    }
}

impl fmt::Display for DefaultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultView::List => f.write_str("list"),
            DefaultView::Calendar => f.write_str("calendar"),
        }
    }
}

/// Global configuration at ~/.config/bday/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BdayConfig {
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub default_view: DefaultView,

    #[serde(default = "default_true")]
    pub notify_day_of: bool,

    #[serde(default = "default_true")]
    pub notify_week_before: bool,

    /// Local time of day (HH:MM) the daemon runs its check.
    #[serde(default = "default_notify_at")]
    pub notify_at: String,
}

impl Default for BdayConfig {
    fn default() -> Self {
        BdayConfig {
            data_dir: default_data_dir(),
            default_view: DefaultView::default(),
            notify_day_of: true,
            notify_week_before: true,
            notify_at: default_notify_at(),
        }
    }
}

impl BdayConfig {
    pub fn config_path() -> BdayResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BdayError::Config("Could not determine config directory".into()))?
            .join("bday");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/bday/config.toml, creating a commented default on first use.
    pub fn load() -> BdayResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> BdayResult<Self> {
        let config: BdayConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| BdayError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| BdayError::Config(e.to_string()))?;

        // Surface a bad time now rather than when the daemon first needs it
        config.notify_time()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save the current config to ~/.config/bday/config.toml
    pub fn save(&self) -> BdayResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> BdayResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| BdayError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BdayError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| BdayError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> BdayResult<()> {
        let contents = format!(
            "\
# bday configuration

# Where birthdays are stored:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# View shown by `bday` without a subcommand (list or calendar):
# default_view = \"list\"

# Remind on the day itself:
# notify_day_of = true

# Remind one week ahead:
# notify_week_before = true

# Time of day the daemon checks for birthdays:
# notify_at = \"{DEFAULT_NOTIFY_AT}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BdayError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| BdayError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn birthdays_path(&self) -> PathBuf {
        self.data_path().join(BIRTHDAYS_FILE)
    }

    /// Check time used before any config has been read.
    pub fn default_notify_time() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
    }

    pub fn notify_time(&self) -> BdayResult<NaiveTime> {
        NaiveTime::parse_from_str(&self.notify_at, "%H:%M").map_err(|_| {
            BdayError::Config(format!(
                "Invalid notify_at '{}'. Expected HH:MM",
                self.notify_at
            ))
        })
    }

    pub fn preferences(&self) -> NotificationPreferences {
        NotificationPreferences {
            notify_day_of: self.notify_day_of,
            notify_week_before: self.notify_week_before,
        }
    }
}

impl PreferenceSource for BdayConfig {
    fn notification_preferences(&self) -> BdayResult<NotificationPreferences> {
        Ok(self.preferences())
    }
}
