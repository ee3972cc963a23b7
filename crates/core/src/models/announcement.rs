//! Announcement model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A campus-wide announcement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(default)]
    pub important: bool,
}

impl Announcement {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        created_by: impl Into<String>,
        important: bool,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            content: content.into(),
            created_at: Utc::now(),
            created_by: created_by.into(),
            important,
        }
    }
}

/// Form input for publishing an announcement
#[derive(Debug, Clone, Default)]
pub struct AnnouncementDraft {
    pub title: String,
    pub content: String,
    pub important: bool,
}
