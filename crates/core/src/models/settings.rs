//! Per-user settings model

use serde::{Deserialize, Serialize};

/// Display and notification preferences for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub id: String,
    pub user_id: String,
    pub dark_mode: bool,
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub language: String,
}

impl Settings {
    /// Default settings for a user who has never saved any
    pub fn defaults_for(user_id: &str) -> Self {
        Self {
            id: Self::id_for(user_id),
            user_id: user_id.to_string(),
            dark_mode: false,
            email_notifications: true,
            push_notifications: false,
            language: "en".to_string(),
        }
    }

    pub fn id_for(user_id: &str) -> String {
        format!("settings-{}", user_id)
    }
}
