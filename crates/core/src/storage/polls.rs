//! Poll storage operations

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use super::records::RecordStore;
use crate::error::{Error, Result};
use crate::invariants::assert_poll_invariants;
use crate::models::{Poll, PollDraft, PollOption, User};
use crate::permissions::{CampusAction, PermissionMatrix};

/// Polls need at least this many options
pub const MIN_POLL_OPTIONS: usize = 2;

pub struct PollStore<'a> {
    records: RecordStore<'a>,
}

impl<'a> PollStore<'a> {
    pub fn new(records: RecordStore<'a>) -> Self {
        Self { records }
    }

    pub fn list(&self) -> Result<Vec<Poll>> {
        self.records.get_all()
    }

    /// Polls ordered for display: open polls first, then by end date
    pub fn list_for_display(&self, now: DateTime<Utc>) -> Result<Vec<Poll>> {
        let mut polls = self.list()?;
        crate::voting::sort_for_display(&mut polls, now);
        Ok(polls)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Poll>> {
        self.records.find_by_id(id)
    }

    /// Store a poll, giving fresh ids to any option without one
    pub fn add(&self, poll: Poll) -> Result<Poll> {
        let poll = self.records.add(poll)?;
        assert_poll_invariants(&poll);
        Ok(poll)
    }

    /// Validate a draft and create the poll as `author`
    #[instrument(skip(self, author, draft), fields(author_id = %author.id))]
    pub fn create(&self, author: &User, draft: &PollDraft, now: DateTime<Utc>) -> Result<Poll> {
        PermissionMatrix::require(author.role, CampusAction::CreatePoll)?;

        let end_date = match draft.end_date {
            Some(end_date)
                if !draft.question.trim().is_empty()
                    && draft.options.iter().all(|o| !o.trim().is_empty()) =>
            {
                end_date
            }
            _ => {
                return Err(Error::Validation(
                    "Please fill in all required fields and at least two options".to_string(),
                ))
            }
        };

        if draft.options.len() < MIN_POLL_OPTIONS {
            return Err(Error::Validation(
                "Please provide at least two options".to_string(),
            ));
        }

        let options = draft
            .options
            .iter()
            .map(|text| PollOption::new(text.trim()))
            .collect();

        let mut poll = Poll::new(draft.question.trim(), options, author.id.clone(), end_date);
        poll.created_at = now;

        let poll = self.add(poll)?;
        info!(id = %poll.id, options = poll.options.len(), "Poll created");
        Ok(poll)
    }

    pub fn update(&self, poll: &Poll) -> Result<Option<Poll>> {
        assert_poll_invariants(poll);
        self.records.update(poll)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        self.records.delete::<Poll>(id)
    }

    /// Delete on behalf of `actor`; admins may delete any, moderators their own
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub fn delete_as(&self, actor: &User, id: &str) -> Result<bool> {
        let Some(poll) = self.find_by_id(id)? else {
            return Ok(false);
        };
        PermissionMatrix::require_delete(actor, &poll.created_by)?;
        self.delete(id)
    }
}
