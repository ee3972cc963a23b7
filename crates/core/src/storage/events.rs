//! Event storage operations

use tracing::{debug, info, instrument};

use super::records::RecordStore;
use super::require_text;
use crate::error::{Error, Result};
use crate::invariants::assert_event_invariants;
use crate::models::{AttendanceChange, Event, EventDraft, User};
use crate::permissions::{CampusAction, PermissionMatrix};

pub struct EventStore<'a> {
    records: RecordStore<'a>,
}

impl<'a> EventStore<'a> {
    pub fn new(records: RecordStore<'a>) -> Self {
        Self { records }
    }

    pub fn list(&self) -> Result<Vec<Event>> {
        self.records.get_all()
    }

    /// Events ordered by date, soonest first
    pub fn list_by_date(&self) -> Result<Vec<Event>> {
        let mut events = self.list()?;
        events.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(events)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Event>> {
        self.records.find_by_id(id)
    }

    pub fn add(&self, event: Event) -> Result<Event> {
        assert_event_invariants(&event);
        self.records.add(event)
    }

    /// Validate a draft and create the event as `author`
    #[instrument(skip(self, author, draft), fields(author_id = %author.id))]
    pub fn create(&self, author: &User, draft: &EventDraft) -> Result<Event> {
        PermissionMatrix::require(author.role, CampusAction::CreateEvent)?;

        const MISSING: &str = "Please fill in all required fields";
        require_text(&draft.title, MISSING)?;
        require_text(&draft.description, MISSING)?;
        require_text(&draft.location, MISSING)?;
        let date = draft
            .date
            .ok_or_else(|| Error::Validation(MISSING.to_string()))?;

        let event = self.add(Event {
            id: String::new(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            date,
            location: draft.location.trim().to_string(),
            created_by: author.id.clone(),
            attendees: Vec::new(),
        })?;
        info!(id = %event.id, "Event created");
        Ok(event)
    }

    pub fn update(&self, event: &Event) -> Result<Option<Event>> {
        assert_event_invariants(event);
        self.records.update(event)
    }

    /// Add the user to the attendees, or remove them if already attending
    #[instrument(skip(self))]
    pub fn toggle_attendance(&self, event_id: &str, user_id: &str) -> Result<AttendanceChange> {
        let mut event = self
            .find_by_id(event_id)?
            .ok_or_else(|| Error::NotFound(format!("Event {}", event_id)))?;

        let change = if event.is_attending(user_id) {
            event.attendees.retain(|id| id != user_id);
            AttendanceChange::Left
        } else {
            event.attendees.push(user_id.to_string());
            AttendanceChange::Joined
        };

        self.update(&event)?
            .ok_or_else(|| Error::NotFound(format!("Event {}", event_id)))?;
        debug!(?change, "Attendance updated");
        Ok(change)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        self.records.delete::<Event>(id)
    }

    /// Delete on behalf of `actor`; admins may delete any, moderators their own
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub fn delete_as(&self, actor: &User, id: &str) -> Result<bool> {
        let Some(event) = self.find_by_id(id)? else {
            return Ok(false);
        };
        PermissionMatrix::require_delete(actor, &event.created_by)?;
        self.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use crate::storage::{Collections, MemoryStore};
    use chrono::{Duration, Utc};

    fn moderator() -> User {
        let mut user = User::new("Moderator User", "moderator@example.com", UserRole::Moderator);
        user.id = "mod-1".to_string();
        user
    }

    fn draft(title: &str, days: i64) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            description: "Details".to_string(),
            date: Some(Utc::now() + Duration::days(days)),
            location: "Main Hall".to_string(),
        }
    }

    #[test]
    fn test_create_and_sort_by_date() {
        let kv = MemoryStore::new();
        kv.events().create(&moderator(), &draft("Later", 10)).unwrap();
        kv.events().create(&moderator(), &draft("Sooner", 2)).unwrap();

        let events = kv.events().list_by_date().unwrap();
        assert_eq!(events[0].title, "Sooner");
        assert_eq!(events[1].title, "Later");
        assert!(events[0].attendees.is_empty());
    }

    #[test]
    fn test_create_requires_date() {
        let kv = MemoryStore::new();
        let mut missing_date = draft("Fair", 1);
        missing_date.date = None;

        let result = kv.events().create(&moderator(), &missing_date);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_toggle_attendance() {
        let kv = MemoryStore::new();
        let event = kv.events().create(&moderator(), &draft("Fair", 1)).unwrap();

        let joined = kv.events().toggle_attendance(&event.id, "student-1").unwrap();
        assert_eq!(joined, AttendanceChange::Joined);
        let stored = kv.events().find_by_id(&event.id).unwrap().unwrap();
        assert_eq!(stored.attendees, vec!["student-1".to_string()]);

        let left = kv.events().toggle_attendance(&event.id, "student-1").unwrap();
        assert_eq!(left, AttendanceChange::Left);
        let stored = kv.events().find_by_id(&event.id).unwrap().unwrap();
        assert!(stored.attendees.is_empty());
    }

    #[test]
    fn test_toggle_attendance_missing_event() {
        let kv = MemoryStore::new();
        let result = kv.events().toggle_attendance("missing", "student-1");
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_is_past() {
        let kv = MemoryStore::new();
        let event = kv.events().create(&moderator(), &draft("Fair", 1)).unwrap();
        assert!(!event.is_past(Utc::now()));
        assert!(event.is_past(event.date + Duration::minutes(1)));
    }
}
