//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::models::{Event, Poll};

/// Validate option ids and the single-vote rule for a poll
pub fn assert_poll_invariants(poll: &Poll) {
    let mut option_ids = HashSet::new();
    for option in &poll.options {
        debug_assert!(
            option_ids.insert(option.id.as_str()),
            "Poll {} has duplicate option id {}",
            poll.id,
            option.id
        );
    }

    // A user id may appear once across all options of a poll
    let mut voters = HashSet::new();
    for option in &poll.options {
        for user_id in &option.votes {
            debug_assert!(
                voters.insert(user_id.as_str()),
                "Poll {} has more than one vote from {}",
                poll.id,
                user_id
            );
        }
    }
}

/// Validate that an event's attendee list has no repeats
pub fn assert_event_invariants(event: &Event) {
    let mut seen = HashSet::new();
    for user_id in &event.attendees {
        debug_assert!(
            seen.insert(user_id.as_str()),
            "Event {} lists attendee {} twice",
            event.id,
            user_id
        );
    }
}

/// Validate that a record id is not empty
pub fn assert_record_id_valid(id: &str, context: &str) {
    debug_assert!(!id.is_empty(), "Empty record id in context: {}", context);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PollOption;
    use chrono::Utc;

    fn make_poll() -> Poll {
        let mut poll = Poll::new(
            "Q?",
            vec![PollOption::new("A"), PollOption::new("B")],
            "admin-1",
            Utc::now(),
        );
        poll.id = "poll-1".to_string();
        poll.options[0].id = "o1".to_string();
        poll.options[1].id = "o2".to_string();
        poll
    }

    #[test]
    fn test_valid_poll() {
        let mut poll = make_poll();
        poll.options[0].votes.push("u1".to_string());
        poll.options[1].votes.push("u2".to_string());
        assert_poll_invariants(&poll);
    }

    #[test]
    #[should_panic(expected = "more than one vote")]
    fn test_double_vote_detected() {
        let mut poll = make_poll();
        poll.options[0].votes.push("u1".to_string());
        poll.options[1].votes.push("u1".to_string());
        assert_poll_invariants(&poll);
    }

    #[test]
    #[should_panic(expected = "duplicate option id")]
    fn test_duplicate_option_detected() {
        let mut poll = make_poll();
        poll.options[1].id = "o1".to_string();
        assert_poll_invariants(&poll);
    }
}
