//! Mock authentication
//!
//! Any known email signs in with the configured demo password. This is a
//! demo gate, not a security boundary.

use tracing::{info, instrument, warn};

use crate::error::{Error, Result};
use crate::models::{User, UserRole};
use crate::storage::{Collections, KeyValueStore};

/// Password accepted for every demo account
pub const DEFAULT_DEMO_PASSWORD: &str = "password";

pub struct MockAuthenticator<'a, K: KeyValueStore> {
    kv: &'a K,
    password: &'a str,
}

impl<'a, K: KeyValueStore> MockAuthenticator<'a, K> {
    pub fn new(kv: &'a K, password: &'a str) -> Self {
        Self { kv, password }
    }

    /// Sign in and persist the user as the current session
    #[instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = self.kv.users().find_by_email(email)?;

        match user {
            Some(user) if password == self.password => {
                self.kv.session().save(&user)?;
                info!(user_id = %user.id, role = %user.role, "User signed in");
                Ok(user)
            }
            _ => {
                warn!("Sign-in rejected");
                Err(Error::Authentication(
                    "Invalid email or password".to_string(),
                ))
            }
        }
    }

    pub fn logout(&self) -> Result<()> {
        self.kv.session().clear()?;
        info!("User signed out");
        Ok(())
    }

    /// The signed-in user from a previous run, if any
    pub fn restore(&self) -> Result<Option<User>> {
        self.kv.session().current_user()
    }

    /// Change the session user's role for demo purposes.
    ///
    /// Only the session copy changes; the users collection keeps the original role.
    #[instrument(skip(self))]
    pub fn switch_role(&self, role: UserRole) -> Result<User> {
        let mut user = self
            .restore()?
            .ok_or_else(|| Error::Authentication("Not signed in".to_string()))?;
        user.role = role;
        self.kv.session().save(&user)?;
        Ok(user)
    }
}
