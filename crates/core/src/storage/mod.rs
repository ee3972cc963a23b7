//! Storage layer for the campus dashboard
//!
//! Collections are JSON arrays kept under string keys in a [`KeyValueStore`].
//! [`Database`] persists them in SQLite; [`MemoryStore`] keeps them in memory.

mod announcements;
mod events;
mod feedback;
mod kv;
mod migrations;
mod polls;
mod records;
pub mod seed;
mod session;
mod settings;
mod traits;
mod users;

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::models::{Announcement, Event, Feedback, Poll, Settings, User};

pub use announcements::AnnouncementStore;
pub use events::EventStore;
pub use feedback::FeedbackStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use polls::{PollStore, MIN_POLL_OPTIONS};
pub use records::{new_record_id, Collection, Record, RecordStore};
pub use session::{SessionStore, SESSION_KEY};
pub use settings::SettingsStore;
pub use traits::{
    AnnouncementRepository, EventRepository, FeedbackRepository, PollRepository,
    SettingsRepository, Storage, UserRepository,
};
pub use users::{UserStore, UNKNOWN_AUTHOR};

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::migrate(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> Result<u32> {
        migrations::schema_version(&self.conn)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Typed accessors for every key-value store
pub trait Collections: KeyValueStore + Sized {
    /// Get the generic record store
    fn records(&self) -> RecordStore<'_> {
        RecordStore::new(self)
    }

    fn users(&self) -> UserStore<'_> {
        UserStore::new(self.records())
    }

    fn announcements(&self) -> AnnouncementStore<'_> {
        AnnouncementStore::new(self.records())
    }

    fn events(&self) -> EventStore<'_> {
        EventStore::new(self.records())
    }

    fn polls(&self) -> PollStore<'_> {
        PollStore::new(self.records())
    }

    fn feedback(&self) -> FeedbackStore<'_> {
        FeedbackStore::new(self.records())
    }

    fn settings(&self) -> SettingsStore<'_> {
        SettingsStore::new(self.records())
    }

    /// Get session store for the signed-in user
    fn session(&self) -> SessionStore<'_> {
        SessionStore::new(self)
    }
}

impl<T: KeyValueStore> Collections for T {}

/// Reject blank form input with a user-facing message
pub(crate) fn require_text(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(message.to_string()));
    }
    Ok(())
}

// Implement repository traits for every key-value store
// This enables using any backend through the trait interface

impl<T: KeyValueStore> UserRepository for T {
    fn list_users(&self) -> Result<Vec<User>> {
        self.users().list()
    }

    fn find_user_by_id(&self, id: &str) -> Result<Option<User>> {
        self.users().find_by_id(id)
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users().find_by_email(email)
    }

    fn create_user(&self, user: User) -> Result<User> {
        self.users().create(user)
    }
}

impl<T: KeyValueStore> AnnouncementRepository for T {
    fn list_announcements(&self) -> Result<Vec<Announcement>> {
        self.announcements().list()
    }

    fn add_announcement(&self, announcement: Announcement) -> Result<Announcement> {
        self.announcements().add(announcement)
    }

    fn update_announcement(&self, announcement: &Announcement) -> Result<Option<Announcement>> {
        self.announcements().update(announcement)
    }

    fn delete_announcement(&self, id: &str) -> Result<bool> {
        self.announcements().delete(id)
    }
}

impl<T: KeyValueStore> EventRepository for T {
    fn list_events(&self) -> Result<Vec<Event>> {
        self.events().list()
    }

    fn find_event_by_id(&self, id: &str) -> Result<Option<Event>> {
        self.events().find_by_id(id)
    }

    fn add_event(&self, event: Event) -> Result<Event> {
        self.events().add(event)
    }

    fn update_event(&self, event: &Event) -> Result<Option<Event>> {
        self.events().update(event)
    }

    fn delete_event(&self, id: &str) -> Result<bool> {
        self.events().delete(id)
    }
}

impl<T: KeyValueStore> PollRepository for T {
    fn list_polls(&self) -> Result<Vec<Poll>> {
        self.polls().list()
    }

    fn find_poll_by_id(&self, id: &str) -> Result<Option<Poll>> {
        self.polls().find_by_id(id)
    }

    fn add_poll(&self, poll: Poll) -> Result<Poll> {
        self.polls().add(poll)
    }

    fn update_poll(&self, poll: &Poll) -> Result<Option<Poll>> {
        self.polls().update(poll)
    }

    fn delete_poll(&self, id: &str) -> Result<bool> {
        self.polls().delete(id)
    }
}

impl<T: KeyValueStore> FeedbackRepository for T {
    fn list_feedback(&self) -> Result<Vec<Feedback>> {
        self.feedback().list()
    }

    fn add_feedback(&self, feedback: Feedback) -> Result<Feedback> {
        self.feedback().add(feedback)
    }
}

impl<T: KeyValueStore> SettingsRepository for T {
    fn find_settings(&self, user_id: &str) -> Result<Option<Settings>> {
        self.settings().get(user_id)
    }

    fn save_settings(&self, settings: &Settings) -> Result<Settings> {
        self.settings().save(settings)
    }
}
