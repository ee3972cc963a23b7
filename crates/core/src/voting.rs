//! Poll voting engine
//!
//! Moves a user's single vote between the options of a poll and derives the
//! values shown next to each option. Activity is always computed from the
//! poll's end date and the clock, never read from storage.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::invariants::assert_poll_invariants;
use crate::models::Poll;
use crate::storage::PollRepository;

/// How a cast vote changed the user's standing in the poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The user had not voted in this poll before
    Recorded,
    /// The user already had a vote, possibly on the same option
    Updated,
}

impl VoteOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            VoteOutcome::Recorded => "Your vote has been recorded",
            VoteOutcome::Updated => "Your vote has been updated",
        }
    }
}

/// Display values for one option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionTally {
    pub option_id: String,
    pub votes: usize,
    /// Share of all votes, rounded half up to a whole percent
    pub percentage: u32,
}

/// Whether `poll` accepts votes at `now`
pub fn is_active(poll: &Poll, now: DateTime<Utc>) -> bool {
    poll.is_active(now)
}

/// Compute the vote count and percentage for every option, in option order
pub fn compute_tally(poll: &Poll) -> Vec<OptionTally> {
    let total = poll.total_votes() as u64;

    poll.options
        .iter()
        .map(|option| {
            let votes = option.votes.len();
            let percentage = if total == 0 {
                0
            } else {
                // round(100 * votes / total), halves rounded up
                ((200 * votes as u64 + total) / (2 * total)) as u32
            };
            OptionTally {
                option_id: option.id.clone(),
                votes,
                percentage,
            }
        })
        .collect()
}

/// Produce the poll with `user_id`'s vote moved to `option_id`.
///
/// Rejects closed polls and unknown options without touching the poll.
pub fn apply_vote(
    poll: &Poll,
    option_id: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<(Poll, VoteOutcome)> {
    if !poll.has_unique_option_ids() {
        return Err(Error::InvalidOperation(format!("Poll {} has duplicate option ids", poll.id)));
    }
    if !poll.is_active(now) {
        return Err(Error::Validation("This poll has ended".to_string()));
    }
    if poll.option(option_id).is_none() {
        return Err(Error::NotFound(format!("Option {} in poll {}", option_id, poll.id)));
    }

    let outcome = if poll.has_voted(user_id) {
        VoteOutcome::Updated
    } else {
        VoteOutcome::Recorded
    };

    let mut updated = poll.clone();
    for option in &mut updated.options {
        option.votes.retain(|id| id != user_id);
        if option.id == option_id {
            option.votes.push(user_id.to_string());
        }
    }

    assert_poll_invariants(&updated);
    Ok((updated, outcome))
}

/// Order polls for display: open polls first, then by end date, soonest first
pub fn sort_for_display(polls: &mut [Poll], now: DateTime<Utc>) {
    polls.sort_by(|a, b| {
        b.is_active(now)
            .cmp(&a.is_active(now))
            .then_with(|| a.end_date.cmp(&b.end_date))
    });
}

/// Casts votes against a poll repository
pub struct VotingEngine<'a, R: PollRepository + ?Sized> {
    repo: &'a R,
    clock: &'a dyn Clock,
}

impl<'a, R: PollRepository + ?Sized> VotingEngine<'a, R> {
    pub fn new(repo: &'a R, clock: &'a dyn Clock) -> Self {
        Self { repo, clock }
    }

    pub fn is_active(&self, poll: &Poll) -> bool {
        is_active(poll, self.clock.now())
    }

    /// Move the user's vote to `option_id` and persist the poll
    #[instrument(skip(self, poll), fields(poll_id = %poll.id))]
    pub fn cast_vote(
        &self,
        poll: &Poll,
        option_id: &str,
        user_id: &str,
    ) -> Result<(Poll, VoteOutcome)> {
        let (updated, outcome) =
            apply_vote(poll, option_id, user_id, self.clock.now()).inspect_err(|e| {
                warn!(error = %e, "Vote rejected");
            })?;

        let stored = self
            .repo
            .update_poll(&updated)?
            .ok_or_else(|| Error::NotFound(format!("Poll {}", poll.id)))?;

        debug!(?outcome, "Vote stored");
        Ok((stored, outcome))
    }

    /// Load the stored poll and cast the vote against it
    pub fn cast_vote_by_id(
        &self,
        poll_id: &str,
        option_id: &str,
        user_id: &str,
    ) -> Result<(Poll, VoteOutcome)> {
        let poll = self
            .repo
            .find_poll_by_id(poll_id)?
            .ok_or_else(|| Error::NotFound(format!("Poll {}", poll_id)))?;
        self.cast_vote(&poll, option_id, user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::PollOption;
    use crate::storage::{Collections, MemoryStore};
    use chrono::Duration;

    fn option(id: &str, votes: &[&str]) -> PollOption {
        PollOption {
            id: id.to_string(),
            text: id.to_uppercase(),
            votes: votes.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn poll_ending(end_date: DateTime<Utc>, options: Vec<PollOption>) -> Poll {
        let mut poll = Poll::new("Favourite?", options, "admin-1", end_date);
        poll.id = "poll-1".to_string();
        poll
    }

    fn percentages(poll: &Poll) -> Vec<u32> {
        compute_tally(poll).iter().map(|t| t.percentage).collect()
    }

    fn stored_poll(kv: &MemoryStore, now: DateTime<Utc>) -> Poll {
        kv.polls()
            .add(poll_ending(
                now + Duration::days(1),
                vec![option("o1", &[]), option("o2", &[])],
            ))
            .unwrap()
    }

    #[test]
    fn test_vote_then_move() {
        let now = Utc::now();
        let kv = MemoryStore::new();
        let clock = FixedClock(now);
        let engine = VotingEngine::new(&kv, &clock);
        let poll = stored_poll(&kv, now);

        let (poll, outcome) = engine.cast_vote(&poll, "o1", "u1").unwrap();
        assert_eq!(outcome, VoteOutcome::Recorded);
        assert_eq!(percentages(&poll), vec![100, 0]);

        let (poll, outcome) = engine.cast_vote(&poll, "o2", "u1").unwrap();
        assert_eq!(outcome, VoteOutcome::Updated);
        assert_eq!(percentages(&poll), vec![0, 100]);
        assert!(!poll.options[0].has_vote_from("u1"));
        assert!(poll.options[1].has_vote_from("u1"));

        let stored = kv.polls().find_by_id("poll-1").unwrap().unwrap();
        assert_eq!(stored, poll);
    }

    #[test]
    fn test_revote_same_option_is_idempotent() {
        let now = Utc::now();
        let kv = MemoryStore::new();
        let clock = FixedClock(now);
        let engine = VotingEngine::new(&kv, &clock);
        let poll = stored_poll(&kv, now);

        let (first, _) = engine.cast_vote(&poll, "o1", "u1").unwrap();
        let (second, outcome) = engine.cast_vote(&first, "o1", "u1").unwrap();

        assert_eq!(outcome, VoteOutcome::Updated);
        assert_eq!(first.options, second.options);
        assert_eq!(second.options[0].votes, vec!["u1".to_string()]);
    }

    #[test]
    fn test_closed_poll_rejected_without_write() {
        let now = Utc::now();
        let kv = MemoryStore::new();
        let poll = stored_poll(&kv, now);
        let clock = FixedClock(poll.end_date + Duration::seconds(1));
        let engine = VotingEngine::new(&kv, &clock);

        let result = engine.cast_vote(&poll, "o1", "u1");
        match result {
            Err(Error::Validation(msg)) => assert_eq!(msg, "This poll has ended"),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(kv.polls().find_by_id("poll-1").unwrap().unwrap().total_votes(), 0);
    }

    #[test]
    fn test_unknown_option_rejected() {
        let now = Utc::now();
        let kv = MemoryStore::new();
        let clock = FixedClock(now);
        let engine = VotingEngine::new(&kv, &clock);
        let poll = stored_poll(&kv, now);
        let (poll, _) = engine.cast_vote(&poll, "o1", "u1").unwrap();

        let result = engine.cast_vote(&poll, "o9", "u1");
        assert!(matches!(result, Err(Error::NotFound(_))));
        let stored = kv.polls().find_by_id("poll-1").unwrap().unwrap();
        assert!(stored.options[0].has_vote_from("u1"));
    }

    #[test]
    fn test_repeated_option_ids_rejected() {
        let now = Utc::now();
        let poll = poll_ending(
            now + Duration::days(1),
            vec![option("", &[]), option("", &[])],
        );

        let result = apply_vote(&poll, "", "u1", now);
        assert!(matches!(result, Err(Error::InvalidOperation(_))));
    }

    #[test]
    fn test_poll_added_without_option_ids_votes_once() {
        let now = Utc::now();
        let kv = MemoryStore::new();
        let poll = kv
            .records()
            .add(poll_ending(
                now + Duration::days(1),
                vec![PollOption::new("A"), PollOption::new("B")],
            ))
            .unwrap();

        assert!(matches!(
            apply_vote(&poll, "", "u1", now),
            Err(Error::NotFound(_))
        ));

        let clock = FixedClock(now);
        let engine = VotingEngine::new(&kv, &clock);
        let target = poll.options[1].id.clone();
        let (poll, _) = engine.cast_vote(&poll, &target, "u1").unwrap();
        assert_eq!(poll.total_votes(), 1);
        assert_eq!(poll.user_vote("u1"), Some(target.as_str()));
    }

    #[test]
    fn test_vote_on_deleted_poll() {
        let now = Utc::now();
        let kv = MemoryStore::new();
        let clock = FixedClock(now);
        let engine = VotingEngine::new(&kv, &clock);
        let poll = stored_poll(&kv, now);
        kv.polls().delete(&poll.id).unwrap();

        assert!(matches!(
            engine.cast_vote(&poll, "o1", "u1"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            engine.cast_vote_by_id(&poll.id, "o1", "u1"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_cast_vote_by_id_uses_stored_votes() {
        let now = Utc::now();
        let kv = MemoryStore::new();
        let clock = FixedClock(now);
        let engine = VotingEngine::new(&kv, &clock);
        let stale = stored_poll(&kv, now);

        engine.cast_vote_by_id("poll-1", "o1", "u1").unwrap();
        let (poll, outcome) = engine.cast_vote_by_id("poll-1", "o2", "u2").unwrap();

        assert_eq!(outcome, VoteOutcome::Recorded);
        assert_eq!(poll.total_votes(), 2);
        assert_eq!(stale.total_votes(), 0);
    }

    #[test]
    fn test_is_active_ignores_stored_flag() {
        let now = Utc::now();
        let json = format!(
            r#"{{"id":"p","question":"Q","options":[],"createdBy":"a","createdAt":"{}","endDate":"{}","isActive":true}}"#,
            (now - Duration::days(2)).to_rfc3339(),
            (now - Duration::days(1)).to_rfc3339(),
        );
        let ended: Poll = serde_json::from_str(&json).unwrap();
        assert!(!is_active(&ended, now));

        let open = poll_ending(now + Duration::hours(1), vec![]);
        assert!(is_active(&open, now));
        assert!(!is_active(&open, open.end_date));
    }

    #[test]
    fn test_tally_empty_poll_is_all_zero() {
        let poll = poll_ending(Utc::now(), vec![option("o1", &[]), option("o2", &[])]);
        assert_eq!(percentages(&poll), vec![0, 0]);
    }

    #[test]
    fn test_tally_rounds_half_up() {
        // 1 of 8 is 12.5%, 7 of 8 is 87.5%
        let poll = poll_ending(
            Utc::now(),
            vec![
                option("o1", &["a"]),
                option("o2", &["b", "c", "d", "e", "f", "g", "h"]),
            ],
        );
        assert_eq!(percentages(&poll), vec![13, 88]);
    }

    #[test]
    fn test_tally_sums_near_hundred() {
        let voters: Vec<String> = (0..12).map(|i| format!("u{}", i)).collect();
        for a in 0..=4usize {
            for b in 0..=4usize {
                for c in 0..=4usize {
                    let total = a + b + c;
                    let split = |from: usize, n: usize| -> Vec<String> {
                        voters[from..from + n].to_vec()
                    };
                    let poll = poll_ending(
                        Utc::now(),
                        vec![
                            PollOption { id: "o1".into(), text: "A".into(), votes: split(0, a) },
                            PollOption { id: "o2".into(), text: "B".into(), votes: split(a, b) },
                            PollOption { id: "o3".into(), text: "C".into(), votes: split(a + b, c) },
                        ],
                    );
                    let sum: u32 = percentages(&poll).iter().sum();
                    if total == 0 {
                        assert_eq!(sum, 0);
                    } else {
                        assert!((97..=103).contains(&sum), "{:?} summed to {}", (a, b, c), sum);
                    }
                }
            }
        }
    }

    #[test]
    fn test_sort_for_display() {
        let now = Utc::now();
        let mut ended = poll_ending(now - Duration::days(1), vec![]);
        ended.id = "ended".to_string();
        let mut later = poll_ending(now + Duration::days(5), vec![]);
        later.id = "later".to_string();
        let mut sooner = poll_ending(now + Duration::days(1), vec![]);
        sooner.id = "sooner".to_string();

        let mut polls = vec![ended, later, sooner];
        sort_for_display(&mut polls, now);

        let ids: Vec<&str> = polls.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["sooner", "later", "ended"]);
    }
}
