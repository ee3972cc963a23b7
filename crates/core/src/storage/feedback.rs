//! Feedback storage operations

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use super::records::RecordStore;
use super::require_text;
use crate::error::{Error, Result};
use crate::models::{Feedback, FeedbackDraft, User, MAX_RATING, MIN_RATING};
use crate::moderation::ContentFilter;
use crate::permissions::{CampusAction, PermissionMatrix};

pub struct FeedbackStore<'a> {
    records: RecordStore<'a>,
}

impl<'a> FeedbackStore<'a> {
    pub fn new(records: RecordStore<'a>) -> Self {
        Self { records }
    }

    pub fn list(&self) -> Result<Vec<Feedback>> {
        self.records.get_all()
    }

    pub fn add(&self, feedback: Feedback) -> Result<Feedback> {
        self.records.add(feedback)
    }

    /// Validate and store feedback from a student
    #[instrument(skip(self, author, draft, filter), fields(author_id = %author.id))]
    pub fn submit(
        &self,
        author: &User,
        draft: &FeedbackDraft,
        filter: &ContentFilter,
        now: DateTime<Utc>,
    ) -> Result<Feedback> {
        PermissionMatrix::require(author.role, CampusAction::SubmitFeedback)?;
        require_text(&draft.content, "Please enter your feedback")?;

        if let Some(term) = filter.find_blocked(&draft.content) {
            warn!(term, "Feedback rejected by content filter");
            return Err(Error::Validation(
                "Your feedback contains inappropriate language".to_string(),
            ));
        }

        if !(MIN_RATING..=MAX_RATING).contains(&draft.rating) {
            return Err(Error::Validation(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let mut feedback = Feedback::new(draft.content.trim(), draft.rating, author.id.clone());
        feedback.created_at = now;

        let feedback = self.add(feedback)?;
        info!(id = %feedback.id, rating = feedback.rating, "Feedback submitted");
        Ok(feedback)
    }

    /// Feedback the viewer may read, newest first.
    ///
    /// Admins see everything, students see their own, moderators see nothing.
    pub fn visible_to(&self, viewer: &User) -> Result<Vec<Feedback>> {
        let mut feedback = self.list()?;
        feedback.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if PermissionMatrix::can_perform(viewer.role, CampusAction::ViewAllFeedback) {
            Ok(feedback)
        } else if PermissionMatrix::can_perform(viewer.role, CampusAction::SubmitFeedback) {
            feedback.retain(|f| f.created_by == viewer.id);
            Ok(feedback)
        } else {
            Ok(Vec::new())
        }
    }
}
