//! Demo data for a fresh store
//!
//! Each collection is written only when its key has never been set, so
//! seeding never overwrites user data. Settings are per user and not seeded.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument};

use super::records::{Collection, Record, RecordStore};
use crate::error::Result;
use crate::models::{Announcement, Event, Feedback, Poll, PollOption, User, UserRole};

fn demo_user(id: &str, name: &str, email: &str, role: UserRole) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        avatar: None,
    }
}

pub fn demo_users() -> Vec<User> {
    vec![
        demo_user("admin-1", "Admin User", "admin@example.com", UserRole::Admin),
        demo_user("mod-1", "Moderator User", "moderator@example.com", UserRole::Moderator),
        demo_user("student-1", "Student One", "student1@example.com", UserRole::Student),
        demo_user("student-2", "Student Two", "student2@example.com", UserRole::Student),
    ]
}

pub fn demo_announcements(now: DateTime<Utc>) -> Vec<Announcement> {
    vec![
        Announcement {
            id: "ann-1".to_string(),
            title: "Welcome to the New Dashboard".to_string(),
            content: "We are excited to introduce our new dashboard with improved features and user experience.".to_string(),
            created_at: now - Duration::days(2),
            created_by: "admin-1".to_string(),
            important: true,
        },
        Announcement {
            id: "ann-2".to_string(),
            title: "System Maintenance".to_string(),
            content: "The system will be under maintenance this weekend. Please save your work before Friday evening.".to_string(),
            created_at: now - Duration::days(1),
            created_by: "mod-1".to_string(),
            important: false,
        },
    ]
}

pub fn demo_events(now: DateTime<Utc>) -> Vec<Event> {
    vec![
        Event {
            id: "event-1".to_string(),
            title: "Annual Conference".to_string(),
            description: "Join us for our annual conference where we will discuss the latest trends and technologies.".to_string(),
            date: now + Duration::days(10),
            location: "Convention Center".to_string(),
            created_by: "admin-1".to_string(),
            attendees: vec!["student-1".to_string()],
        },
        Event {
            id: "event-2".to_string(),
            title: "Workshop on Modern Web Development".to_string(),
            description: "Learn about the latest web development techniques and tools in this hands-on workshop.".to_string(),
            date: now + Duration::days(5),
            location: "Tech Hub".to_string(),
            created_by: "mod-1".to_string(),
            attendees: vec!["student-1".to_string(), "student-2".to_string()],
        },
    ]
}

pub fn demo_polls(now: DateTime<Utc>) -> Vec<Poll> {
    let option = |id: &str, text: &str, votes: &[&str]| PollOption {
        id: id.to_string(),
        text: text.to_string(),
        votes: votes.iter().map(|v| v.to_string()).collect(),
    };

    vec![Poll {
        id: "poll-1".to_string(),
        question: "What feature would you like to see next?".to_string(),
        options: vec![
            option("opt-1", "Dark Mode", &["student-1"]),
            option("opt-2", "Mobile App", &[]),
            option("opt-3", "More Integrations", &["student-2"]),
        ],
        created_by: "admin-1".to_string(),
        created_at: now - Duration::days(3),
        end_date: now + Duration::days(4),
    }]
}

pub fn demo_feedback(now: DateTime<Utc>) -> Vec<Feedback> {
    vec![
        Feedback {
            id: "feedback-1".to_string(),
            content: "The dashboard is very intuitive and easy to use. I especially like the calendar integration.".to_string(),
            rating: 5,
            created_at: now - Duration::days(4),
            created_by: "student-1".to_string(),
        },
        Feedback {
            id: "feedback-2".to_string(),
            content: "I found the poll feature a bit confusing. It would be nice to have more instructions.".to_string(),
            rating: 3,
            created_at: now - Duration::days(2),
            created_by: "student-2".to_string(),
        },
    ]
}

fn seed_collection<R: Record>(
    records: &RecordStore<'_>,
    items: Vec<R>,
    seeded: &mut Vec<Collection>,
) -> Result<()> {
    if !records.is_initialized(R::COLLECTION)? {
        records.replace_all(&items)?;
        seeded.push(R::COLLECTION);
    }
    Ok(())
}

/// Write demo data into every empty collection. Returns the collections written.
#[instrument(skip(records))]
pub fn seed_demo_data(records: &RecordStore<'_>, now: DateTime<Utc>) -> Result<Vec<Collection>> {
    let mut seeded = Vec::new();

    seed_collection(records, demo_users(), &mut seeded)?;
    seed_collection(records, demo_announcements(now), &mut seeded)?;
    seed_collection(records, demo_events(now), &mut seeded)?;
    seed_collection(records, demo_polls(now), &mut seeded)?;
    seed_collection(records, demo_feedback(now), &mut seeded)?;

    if !seeded.is_empty() {
        info!(collections = ?seeded, "Seeded demo data");
    }
    Ok(seeded)
}
