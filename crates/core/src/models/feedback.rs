//! Feedback model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Feedback submitted by a student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub content: String,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl Feedback {
    pub fn new(content: impl Into<String>, rating: u8, created_by: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            content: content.into(),
            rating,
            created_at: Utc::now(),
            created_by: created_by.into(),
        }
    }
}

/// Form input for submitting feedback
#[derive(Debug, Clone)]
pub struct FeedbackDraft {
    pub content: String,
    pub rating: u8,
}

impl Default for FeedbackDraft {
    fn default() -> Self {
        Self {
            content: String::new(),
            rating: MAX_RATING,
        }
    }
}
