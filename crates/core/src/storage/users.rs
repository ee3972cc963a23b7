//! User storage operations

use tracing::instrument;

use super::records::RecordStore;
use crate::error::Result;
use crate::models::User;

/// Display name used when an author id no longer resolves
pub const UNKNOWN_AUTHOR: &str = "Unknown User";

pub struct UserStore<'a> {
    records: RecordStore<'a>,
}

impl<'a> UserStore<'a> {
    pub fn new(records: RecordStore<'a>) -> Self {
        Self { records }
    }

    pub fn list(&self) -> Result<Vec<User>> {
        self.records.get_all()
    }

    /// Create a new user
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub fn create(&self, user: User) -> Result<User> {
        self.records.add(user)
    }

    /// Find user by ID
    pub fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        self.records.find_by_id(id)
    }

    /// Find user by email, ignoring case
    #[instrument(skip(self))]
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.trim();
        self.records
            .find_first(|u: &User| u.email.eq_ignore_ascii_case(email))
    }

    /// Author name for display, falling back to [`UNKNOWN_AUTHOR`]
    pub fn author_name(&self, id: &str) -> Result<String> {
        Ok(self
            .find_by_id(id)?
            .map(|u| u.name)
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use crate::storage::{Collections, MemoryStore};

    #[test]
    fn test_find_by_email_case_insensitive() {
        let kv = MemoryStore::new();
        let created = kv
            .users()
            .create(User::new("Student One", "student1@example.com", UserRole::Student))
            .unwrap();

        let found = kv.users().find_by_email(" Student1@Example.COM ").unwrap();
        assert_eq!(found, Some(created));
        assert!(kv.users().find_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn test_author_name_fallback() {
        let kv = MemoryStore::new();
        let user = kv
            .users()
            .create(User::new("Admin User", "admin@example.com", UserRole::Admin))
            .unwrap();

        assert_eq!(kv.users().author_name(&user.id).unwrap(), "Admin User");
        assert_eq!(kv.users().author_name("ghost").unwrap(), UNKNOWN_AUTHOR);
    }
}
