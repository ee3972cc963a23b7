//! Generic record collections
//!
//! Each collection is stored as one JSON array under its key. Every write
//! reads the whole array, modifies it, and writes the whole array back, so
//! a store must have a single writer.

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::kv::KeyValueStore;
use crate::error::{Error, Result};
use crate::invariants::assert_record_id_valid;
use crate::models::{Announcement, Event, Feedback, Poll, Settings, User};

/// Named collections in the key-value store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Announcements,
    Events,
    Polls,
    Feedback,
    Settings,
}

impl Collection {
    /// Storage key for this collection
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Announcements => "announcements",
            Collection::Events => "events",
            Collection::Polls => "polls",
            Collection::Feedback => "feedback",
            Collection::Settings => "settings",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A uniquely identified entity stored in a [`Collection`]
pub trait Record: Serialize + DeserializeOwned + Clone {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Fill in and check nested ids before the record is first stored
    fn prepare_insert(&mut self) -> Result<()> {
        Ok(())
    }
}

macro_rules! impl_record {
    ($ty:ty, $collection:expr $(, prepare = $prepare:path)?) => {
        impl Record for $ty {
            const COLLECTION: Collection = $collection;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            $(
                fn prepare_insert(&mut self) -> Result<()> {
                    $prepare(self)
                }
            )?
        }
    };
}

impl_record!(User, Collection::Users);
impl_record!(Announcement, Collection::Announcements);
impl_record!(Event, Collection::Events);
impl_record!(Poll, Collection::Polls, prepare = prepare_poll);
impl_record!(Feedback, Collection::Feedback);
impl_record!(Settings, Collection::Settings);

/// Generate a fresh record id
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Options without an id get a fresh one; repeated option ids are rejected
fn prepare_poll(poll: &mut Poll) -> Result<()> {
    for option in poll.options.iter_mut().filter(|o| o.id.is_empty()) {
        option.id = new_record_id();
    }
    if !poll.has_unique_option_ids() {
        return Err(Error::Validation(format!("Poll {} has duplicate option ids", poll.id)));
    }
    Ok(())
}

/// CRUD over JSON collections in a key-value store
pub struct RecordStore<'a> {
    kv: &'a dyn KeyValueStore,
}

impl<'a> RecordStore<'a> {
    pub fn new(kv: &'a dyn KeyValueStore) -> Self {
        Self { kv }
    }

    /// All records in insertion order; empty when the collection was never written
    pub fn get_all<R: Record>(&self) -> Result<Vec<R>> {
        let key = R::COLLECTION.key();
        match self.kv.get(key)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| {
                warn!(collection = key, error = %source, "Stored collection is corrupt");
                Error::CorruptState {
                    collection: key.to_string(),
                    source,
                }
            }),
        }
    }

    /// First record matching `predicate`
    pub fn find_first<R: Record>(&self, predicate: impl Fn(&R) -> bool) -> Result<Option<R>> {
        Ok(self.get_all::<R>()?.into_iter().find(|r| predicate(r)))
    }

    pub fn find_by_id<R: Record>(&self, id: &str) -> Result<Option<R>> {
        self.find_first(|r: &R| r.id() == id)
    }

    /// Whether the collection key exists at all, even as an empty array
    pub fn is_initialized(&self, collection: Collection) -> Result<bool> {
        Ok(self.kv.get(collection.key())?.is_some())
    }

    /// Overwrite a whole collection
    pub fn replace_all<R: Record>(&self, records: &[R]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.kv.set(R::COLLECTION.key(), &raw)
    }

    /// Append a record. An empty id is replaced with a fresh one; a supplied
    /// id that already exists in the collection is rejected.
    #[instrument(skip(self, record), fields(collection = %R::COLLECTION))]
    pub fn add<R: Record>(&self, mut record: R) -> Result<R> {
        let mut records = self.get_all::<R>()?;

        if record.id().is_empty() {
            record.set_id(new_record_id());
        } else if records.iter().any(|r| r.id() == record.id()) {
            return Err(Error::InvalidOperation(format!(
                "Duplicate id '{}' in {}",
                record.id(),
                R::COLLECTION
            )));
        }

        assert_record_id_valid(record.id(), R::COLLECTION.key());
        record.prepare_insert()?;

        records.push(record.clone());
        self.replace_all(&records)?;
        debug!(id = record.id(), "Record added");
        Ok(record)
    }

    /// Replace the first record with the same id. `None` if there is no such record.
    #[instrument(skip(self, record), fields(collection = %R::COLLECTION, id = record.id()))]
    pub fn update<R: Record>(&self, record: &R) -> Result<Option<R>> {
        let mut records = self.get_all::<R>()?;

        let Some(slot) = records.iter_mut().find(|r| r.id() == record.id()) else {
            debug!("Update target not found");
            return Ok(None);
        };
        *slot = record.clone();

        self.replace_all(&records)?;
        Ok(Some(record.clone()))
    }

    /// Remove every record with `id`. Returns whether anything was removed.
    #[instrument(skip(self), fields(collection = %R::COLLECTION))]
    pub fn delete<R: Record>(&self, id: &str) -> Result<bool> {
        let mut records = self.get_all::<R>()?;
        let before = records.len();
        records.retain(|r| r.id() != id);

        if records.len() == before {
            return Ok(false);
        }

        self.replace_all(&records)?;
        debug!(removed = before - records.len(), "Records deleted");
        Ok(true)
    }
}
