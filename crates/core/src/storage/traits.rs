//! Storage repository traits
//!
//! These traits define the storage interface used by the services, allowing
//! any [`super::KeyValueStore`] (SQLite, memory) to back them.

use crate::error::Result;
use crate::models::{Announcement, Event, Feedback, Poll, Settings, User};

/// User repository operations
pub trait UserRepository {
    /// List all users
    fn list_users(&self) -> Result<Vec<User>>;

    /// Find user by ID
    fn find_user_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Find user by email, ignoring case
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Create a new user
    fn create_user(&self, user: User) -> Result<User>;
}

/// Announcement repository operations
pub trait AnnouncementRepository {
    fn list_announcements(&self) -> Result<Vec<Announcement>>;

    fn add_announcement(&self, announcement: Announcement) -> Result<Announcement>;

    fn update_announcement(&self, announcement: &Announcement) -> Result<Option<Announcement>>;

    fn delete_announcement(&self, id: &str) -> Result<bool>;
}

/// Event repository operations
pub trait EventRepository {
    fn list_events(&self) -> Result<Vec<Event>>;

    fn find_event_by_id(&self, id: &str) -> Result<Option<Event>>;

    fn add_event(&self, event: Event) -> Result<Event>;

    fn update_event(&self, event: &Event) -> Result<Option<Event>>;

    fn delete_event(&self, id: &str) -> Result<bool>;
}

/// Poll repository operations
pub trait PollRepository {
    fn list_polls(&self) -> Result<Vec<Poll>>;

    fn find_poll_by_id(&self, id: &str) -> Result<Option<Poll>>;

    fn add_poll(&self, poll: Poll) -> Result<Poll>;

    /// Replace a stored poll; `None` when no poll has that id
    fn update_poll(&self, poll: &Poll) -> Result<Option<Poll>>;

    fn delete_poll(&self, id: &str) -> Result<bool>;
}

/// Feedback repository operations
pub trait FeedbackRepository {
    fn list_feedback(&self) -> Result<Vec<Feedback>>;

    fn add_feedback(&self, feedback: Feedback) -> Result<Feedback>;
}

/// Settings repository operations
pub trait SettingsRepository {
    fn find_settings(&self, user_id: &str) -> Result<Option<Settings>>;

    fn save_settings(&self, settings: &Settings) -> Result<Settings>;
}

/// Combined storage interface
pub trait Storage:
    UserRepository
    + AnnouncementRepository
    + EventRepository
    + PollRepository
    + FeedbackRepository
    + SettingsRepository
{
}

// Blanket implementation: any type implementing all traits implements Storage
impl<T> Storage for T where
    T: UserRepository
        + AnnouncementRepository
        + EventRepository
        + PollRepository
        + FeedbackRepository
        + SettingsRepository
{
}
