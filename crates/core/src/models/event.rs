//! Event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled campus event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub created_by: String,
    /// User ids attending, each at most once
    #[serde(default)]
    pub attendees: Vec<String>,
}

impl Event {
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.date < now
    }

    pub fn is_attending(&self, user_id: &str) -> bool {
        self.attendees.iter().any(|id| id == user_id)
    }
}

/// Form input for creating an event
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: Option<DateTime<Utc>>,
    pub location: String,
}

/// Result of toggling attendance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceChange {
    Joined,
    Left,
}

impl AttendanceChange {
    pub fn message(&self) -> &'static str {
        match self {
            AttendanceChange::Joined => "You are now attending this event",
            AttendanceChange::Left => "You are no longer attending this event",
        }
    }
}
