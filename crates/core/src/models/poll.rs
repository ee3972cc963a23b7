//! Poll models
//!
//! A poll's active status is derived from `end_date` at read time. Older
//! stored polls may still carry an `isActive` field; it is ignored on load
//! and never written back.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single answer in a poll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub text: String,
    /// User ids that voted for this option. Semantically a set.
    #[serde(default)]
    pub votes: Vec<String>,
}

impl PollOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            text: text.into(),
            votes: Vec::new(),
        }
    }

    pub fn has_vote_from(&self, user_id: &str) -> bool {
        self.votes.iter().any(|id| id == user_id)
    }
}

/// A poll with its options and votes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: String,
    pub question: String,
    pub options: Vec<PollOption>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl Poll {
    pub fn new(
        question: impl Into<String>,
        options: Vec<PollOption>,
        created_by: impl Into<String>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: String::new(),
            question: question.into(),
            options,
            created_by: created_by.into(),
            created_at: Utc::now(),
            end_date,
        }
    }

    /// Whether voting is still open at `now`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.end_date
    }

    pub fn option(&self, option_id: &str) -> Option<&PollOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Sum of votes across all options
    pub fn total_votes(&self) -> usize {
        self.options.iter().map(|o| o.votes.len()).sum()
    }

    /// The option a user currently votes for, if any
    pub fn user_vote(&self, user_id: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.has_vote_from(user_id))
            .map(|o| o.id.as_str())
    }

    pub fn has_voted(&self, user_id: &str) -> bool {
        self.user_vote(user_id).is_some()
    }

    /// Whether every option id is distinct
    pub fn has_unique_option_ids(&self) -> bool {
        let mut seen = HashSet::new();
        self.options.iter().all(|o| seen.insert(o.id.as_str()))
    }
}

/// Form input for creating a poll
#[derive(Debug, Clone, Default)]
pub struct PollDraft {
    pub question: String,
    pub options: Vec<String>,
    pub end_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_legacy_is_active_field_ignored() {
        let json = r#"{
            "id": "poll-1",
            "question": "Q?",
            "options": [{"id": "o1", "text": "A", "votes": ["u1"]}],
            "createdBy": "admin-1",
            "createdAt": "2024-01-01T00:00:00Z",
            "endDate": "2024-01-02T00:00:00Z",
            "isActive": true
        }"#;
        let poll: Poll = serde_json::from_str(json).unwrap();
        let after_end = poll.end_date + Duration::seconds(1);
        assert!(!poll.is_active(after_end));

        let written = serde_json::to_string(&poll).unwrap();
        assert!(!written.contains("isActive"));
        assert!(written.contains("endDate"));
    }

    #[test]
    fn test_user_vote_lookup() {
        let mut poll = Poll::new(
            "Q?",
            vec![PollOption::new("A"), PollOption::new("B")],
            "admin-1",
            Utc::now() + Duration::days(1),
        );
        poll.options[0].id = "o1".to_string();
        poll.options[1].id = "o2".to_string();
        poll.options[1].votes.push("u1".to_string());

        assert_eq!(poll.user_vote("u1"), Some("o2"));
        assert!(!poll.has_voted("u2"));
        assert_eq!(poll.total_votes(), 1);
    }
}
