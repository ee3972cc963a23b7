//! Per-user settings persistence
//!
//! Settings are kept one entry per user and looked up by `user_id`.

use tracing::{debug, instrument};

use super::records::RecordStore;
use crate::error::Result;
use crate::models::Settings;

/// Settings store
pub struct SettingsStore<'a> {
    records: RecordStore<'a>,
}

impl<'a> SettingsStore<'a> {
    pub fn new(records: RecordStore<'a>) -> Self {
        Self { records }
    }

    /// Load settings for a user
    pub fn get(&self, user_id: &str) -> Result<Option<Settings>> {
        self.records.find_first(|s: &Settings| s.user_id == user_id)
    }

    /// Stored settings, or the defaults when the user never saved any
    pub fn load_or_default(&self, user_id: &str) -> Result<Settings> {
        Ok(self
            .get(user_id)?
            .unwrap_or_else(|| Settings::defaults_for(user_id)))
    }

    /// Insert or replace the user's settings
    #[instrument(skip(self, settings), fields(user_id = %settings.user_id))]
    pub fn save(&self, settings: &Settings) -> Result<Settings> {
        let mut settings = settings.clone();
        if settings.id.is_empty() {
            settings.id = Settings::id_for(&settings.user_id);
        }

        let mut all: Vec<Settings> = self.records.get_all()?;
        match all.iter_mut().find(|s| s.user_id == settings.user_id) {
            Some(existing) => {
                *existing = settings.clone();
                self.records.replace_all(&all)?;
                debug!("Settings replaced");
            }
            None => {
                self.records.add(settings.clone())?;
                debug!("Settings created");
            }
        }

        Ok(settings)
    }
}
