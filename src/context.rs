use anyhow::Result;
use bday_core::config::BdayConfig;
use bday_core::store::BirthdayStore;

/// Config plus the store it points at.
pub struct Context {
    pub config: BdayConfig,
    pub store: BirthdayStore,
}

impl Context {
    pub fn load() -> Result<Self> {
        let config = BdayConfig::load()?;
        let store = BirthdayStore::open(config.birthdays_path())?;

        Ok(Context { config, store })
    }

    /// Like `load`, but fail with a hint when nothing has been added yet.
    pub fn load_nonempty() -> Result<Self> {
        let ctx = Self::load()?;

        if ctx.store.is_empty() {
            anyhow::bail!(
                "No birthdays yet.\n\n\
                Add your first one with:\n  \
                bday add <name> <YYYY-MM-DD>\n\n\
                Example:\n  \
                bday add \"Ada Lovelace\" 1815-12-10 --category Friends"
            );
        }

        Ok(ctx)
    }
}
