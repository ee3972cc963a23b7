//! Announcement storage operations

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use super::records::RecordStore;
use super::require_text;
use crate::error::Result;
use crate::models::{Announcement, AnnouncementDraft, User};
use crate::permissions::{CampusAction, PermissionMatrix};

pub struct AnnouncementStore<'a> {
    records: RecordStore<'a>,
}

impl<'a> AnnouncementStore<'a> {
    pub fn new(records: RecordStore<'a>) -> Self {
        Self { records }
    }

    /// All announcements in stored order
    pub fn list(&self) -> Result<Vec<Announcement>> {
        self.records.get_all()
    }

    /// Announcements newest first
    pub fn list_newest_first(&self) -> Result<Vec<Announcement>> {
        let mut announcements = self.list()?;
        announcements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(announcements)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Announcement>> {
        self.records.find_by_id(id)
    }

    pub fn add(&self, announcement: Announcement) -> Result<Announcement> {
        self.records.add(announcement)
    }

    /// Validate a draft and publish it as `author`
    #[instrument(skip(self, author, draft), fields(author_id = %author.id))]
    pub fn publish(
        &self,
        author: &User,
        draft: &AnnouncementDraft,
        now: DateTime<Utc>,
    ) -> Result<Announcement> {
        PermissionMatrix::require(author.role, CampusAction::CreateAnnouncement)?;
        require_text(&draft.title, "Please fill in all required fields")?;
        require_text(&draft.content, "Please fill in all required fields")?;

        let mut announcement = Announcement::new(
            draft.title.trim(),
            draft.content.trim(),
            author.id.clone(),
            draft.important,
        );
        announcement.created_at = now;

        let announcement = self.add(announcement)?;
        info!(id = %announcement.id, "Announcement published");
        Ok(announcement)
    }

    pub fn update(&self, announcement: &Announcement) -> Result<Option<Announcement>> {
        self.records.update(announcement)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        self.records.delete::<Announcement>(id)
    }

    /// Delete on behalf of `actor`; admins may delete any, moderators their own
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub fn delete_as(&self, actor: &User, id: &str) -> Result<bool> {
        let Some(announcement) = self.find_by_id(id)? else {
            return Ok(false);
        };
        PermissionMatrix::require_delete(actor, &announcement.created_by)?;
        self.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::UserRole;
    use crate::storage::{Collections, MemoryStore};
    use chrono::Duration;

    fn staff(id: &str, role: UserRole) -> User {
        let mut user = User::new(id, format!("{}@example.com", id), role);
        user.id = id.to_string();
        user
    }

    #[test]
    fn test_publish_and_order() {
        let kv = MemoryStore::new();
        let admin = staff("admin-1", UserRole::Admin);
        let now = Utc::now();

        let older = AnnouncementDraft {
            title: "Older".to_string(),
            content: "First".to_string(),
            important: false,
        };
        let newer = AnnouncementDraft {
            title: "Newer".to_string(),
            content: "Second".to_string(),
            important: true,
        };
        kv.announcements()
            .publish(&admin, &older, now - Duration::hours(1))
            .unwrap();
        kv.announcements().publish(&admin, &newer, now).unwrap();

        let list = kv.announcements().list_newest_first().unwrap();
        assert_eq!(list[0].title, "Newer");
        assert!(list[0].important);
        assert_eq!(list[1].title, "Older");
    }

    #[test]
    fn test_publish_requires_fields() {
        let kv = MemoryStore::new();
        let admin = staff("admin-1", UserRole::Admin);
        let draft = AnnouncementDraft {
            title: "  ".to_string(),
            content: "Body".to_string(),
            important: false,
        };

        let result = kv.announcements().publish(&admin, &draft, Utc::now());
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(kv.announcements().list().unwrap().is_empty());
    }

    #[test]
    fn test_student_cannot_publish() {
        let kv = MemoryStore::new();
        let student = staff("student-1", UserRole::Student);
        let draft = AnnouncementDraft {
            title: "Hi".to_string(),
            content: "Body".to_string(),
            important: false,
        };

        let result = kv.announcements().publish(&student, &draft, Utc::now());
        assert!(matches!(result, Err(Error::PermissionDenied(_))));
    }

    #[test]
    fn test_moderator_deletes_only_own() {
        let kv = MemoryStore::new();
        let admin = staff("admin-1", UserRole::Admin);
        let moderator = staff("mod-1", UserRole::Moderator);
        let draft = AnnouncementDraft {
            title: "Notice".to_string(),
            content: "Body".to_string(),
            important: false,
        };

        let by_admin = kv.announcements().publish(&admin, &draft, Utc::now()).unwrap();
        let by_mod = kv
            .announcements()
            .publish(&moderator, &draft, Utc::now())
            .unwrap();

        let denied = kv.announcements().delete_as(&moderator, &by_admin.id);
        assert!(matches!(denied, Err(Error::PermissionDenied(_))));
        assert!(kv.announcements().delete_as(&moderator, &by_mod.id).unwrap());
        assert!(!kv.announcements().delete_as(&admin, "missing").unwrap());
        assert_eq!(kv.announcements().list().unwrap().len(), 1);
    }
}
