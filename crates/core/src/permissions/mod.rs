//! Permission system for dashboard operations

use crate::error::{Error, Result};
use crate::models::{User, UserRole};

/// Actions that can be performed on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampusAction {
    // Publishing
    CreateAnnouncement,
    CreateEvent,
    CreatePoll,
    AccessCreatePage,

    // Removal
    DeleteAnyContent,
    DeleteOwnContent,

    // Participation
    VoteInPolls,
    AttendEvents,

    // Feedback
    SubmitFeedback,
    ViewAllFeedback,
    ViewFeedbackPreview,
}

impl CampusAction {
    fn describe(&self) -> &'static str {
        match self {
            CampusAction::CreateAnnouncement => "create announcements",
            CampusAction::CreateEvent => "create events",
            CampusAction::CreatePoll => "create polls",
            CampusAction::AccessCreatePage => "access the create page",
            CampusAction::DeleteAnyContent => "delete content",
            CampusAction::DeleteOwnContent => "delete own content",
            CampusAction::VoteInPolls => "vote in polls",
            CampusAction::AttendEvents => "attend events",
            CampusAction::SubmitFeedback => "submit feedback",
            CampusAction::ViewAllFeedback => "view all feedback",
            CampusAction::ViewFeedbackPreview => "view feedback",
        }
    }
}

/// Permission matrix for dashboard roles
pub struct PermissionMatrix;

impl PermissionMatrix {
    /// Check if a role has permission to perform an action
    pub fn can_perform(role: UserRole, action: CampusAction) -> bool {
        match action {
            // Publishing - staff only
            CampusAction::CreateAnnouncement
            | CampusAction::CreateEvent
            | CampusAction::CreatePoll
            | CampusAction::AccessCreatePage => role >= UserRole::Moderator,

            CampusAction::DeleteAnyContent => role == UserRole::Admin,
            CampusAction::DeleteOwnContent => role == UserRole::Moderator,

            CampusAction::VoteInPolls | CampusAction::AttendEvents => true,

            // Students write feedback, admins read all of it
            CampusAction::SubmitFeedback => role == UserRole::Student,
            CampusAction::ViewAllFeedback => role == UserRole::Admin,
            CampusAction::ViewFeedbackPreview => role >= UserRole::Moderator,
        }
    }

    /// Check if `actor` may delete content created by `owner_id`
    pub fn can_delete(actor: &User, owner_id: &str) -> bool {
        Self::can_perform(actor.role, CampusAction::DeleteAnyContent)
            || (Self::can_perform(actor.role, CampusAction::DeleteOwnContent)
                && actor.id == owner_id)
    }

    /// Fail with `PermissionDenied` unless the role may perform the action
    pub fn require(role: UserRole, action: CampusAction) -> Result<()> {
        if Self::can_perform(role, action) {
            Ok(())
        } else {
            Err(Error::PermissionDenied(format!(
                "{} cannot {}",
                role,
                action.describe()
            )))
        }
    }

    /// Fail with `PermissionDenied` unless `actor` may delete content owned by `owner_id`
    pub fn require_delete(actor: &User, owner_id: &str) -> Result<()> {
        if Self::can_delete(actor, owner_id) {
            Ok(())
        } else {
            Err(Error::PermissionDenied(format!(
                "{} cannot delete content created by someone else",
                actor.role
            )))
        }
    }
}
