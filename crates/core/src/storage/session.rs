//! Signed-in user persistence

use tracing::{instrument, warn};

use super::kv::KeyValueStore;
use crate::error::{Error, Result};
use crate::models::User;

/// Key holding the signed-in user
pub const SESSION_KEY: &str = "currentUser";

/// Session store
pub struct SessionStore<'a> {
    kv: &'a dyn KeyValueStore,
}

impl<'a> SessionStore<'a> {
    pub fn new(kv: &'a dyn KeyValueStore) -> Self {
        Self { kv }
    }

    /// The persisted signed-in user, if any
    pub fn current_user(&self) -> Result<Option<User>> {
        let Some(raw) = self.kv.get(SESSION_KEY)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw).map(Some).map_err(|source| {
            warn!(error = %source, "Stored session is corrupt");
            Error::CorruptState {
                collection: SESSION_KEY.to_string(),
                source,
            }
        })
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub fn save(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.kv.set(SESSION_KEY, &raw)
    }

    pub fn clear(&self) -> Result<()> {
        self.kv.remove(SESSION_KEY)
    }
}
