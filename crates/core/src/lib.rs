//! Campus Core Library
//!
//! Models, record storage, poll voting, and role permissions for the campus
//! communication dashboard.

pub mod auth;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod invariants;
pub mod models;
pub mod moderation;
pub mod permissions;
pub mod storage;
pub mod voting;

pub use auth::MockAuthenticator;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CampusConfig;
pub use dashboard::{DashboardStats, DashboardSummary};
pub use error::{Error, Result};
pub use models::*;
pub use moderation::ContentFilter;
pub use permissions::*;
pub use storage::{
    Collection, Collections, Database, KeyValueStore, MemoryStore, PollRepository, Record,
    RecordStore, Storage,
};
pub use voting::{compute_tally, OptionTally, VoteOutcome, VotingEngine};
