//! Dashboard summary for the signed-in user

use crate::error::Result;
use crate::models::{Announcement, Event, Feedback, Poll, User};
use crate::permissions::{CampusAction, PermissionMatrix};
use crate::storage::{Collections, KeyValueStore};

/// Collection totals shown on the dashboard cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_announcements: usize,
    pub total_events: usize,
    pub total_polls: usize,
    pub total_feedback: usize,
}

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub announcements: Vec<Announcement>,
    pub events: Vec<Event>,
    pub polls: Vec<Poll>,
    /// Empty unless the viewer may preview feedback
    pub feedback: Vec<Feedback>,
}

impl DashboardSummary {
    /// Build the summary, previewing the first `preview` records of each collection
    pub fn build<K: KeyValueStore>(kv: &K, viewer: &User, preview: usize) -> Result<Self> {
        let announcements = kv.announcements().list()?;
        let events = kv.events().list()?;
        let polls = kv.polls().list()?;
        let feedback = kv.feedback().list()?;

        let stats = DashboardStats {
            total_announcements: announcements.len(),
            total_events: events.len(),
            total_polls: polls.len(),
            total_feedback: feedback.len(),
        };

        let feedback =
            if PermissionMatrix::can_perform(viewer.role, CampusAction::ViewFeedbackPreview) {
                first(feedback, preview)
            } else {
                Vec::new()
            };

        Ok(Self {
            stats,
            announcements: first(announcements, preview),
            events: first(events, preview),
            polls: first(polls, preview),
            feedback,
        })
    }
}

fn first<T>(mut items: Vec<T>, n: usize) -> Vec<T> {
    items.truncate(n);
    items
}
