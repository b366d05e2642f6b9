//! # Election Record
//!
//! One in-flight votekick: who is targeted, who may vote, who has voted,
//! and the handle of the timer that expires it.

use std::collections::BTreeSet;
use tokio::task::AbortHandle;

/// Elections are scoped to one target within one group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElectionKey {
    pub group_id: String,
    pub target_id: String,
}

impl ElectionKey {
    pub fn new(group_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            target_id: target_id.into(),
        }
    }
}

/// Result of casting a vote on an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    AlreadyVoted,
    Ineligible,
    Accepted { votes: usize, required: usize },
}

/// Votes needed to pass: `ceil(percent / 100 * eligible)`, in integer arithmetic.
pub fn quorum(eligible: usize, percent: u32) -> usize {
    (eligible * percent as usize).div_ceil(100)
}

#[derive(Debug)]
pub struct ElectionRecord {
    key: ElectionKey,
    initiator_id: String,
    eligible_voters: BTreeSet<String>,
    votes: BTreeSet<String>,
    required_votes: usize,
    election_id: u64,
    expiry: Option<AbortHandle>,
}

impl ElectionRecord {
    /// Builds a record with the initiator's vote already counted.
    /// The initiator must be one of `eligible_voters`.
    pub fn new(
        key: ElectionKey,
        initiator_id: impl Into<String>,
        eligible_voters: BTreeSet<String>,
        required_votes: usize,
        election_id: u64,
    ) -> Self {
        let initiator_id = initiator_id.into();
        debug_assert!(eligible_voters.contains(&initiator_id));
        let votes = BTreeSet::from([initiator_id.clone()]);
        Self {
            key,
            initiator_id,
            eligible_voters,
            votes,
            required_votes,
            election_id,
            expiry: None,
        }
    }

    pub fn with_expiry(mut self, handle: AbortHandle) -> Self {
        self.expiry = Some(handle);
        self
    }

    pub fn key(&self) -> &ElectionKey {
        &self.key
    }

    pub fn initiator_id(&self) -> &str {
        &self.initiator_id
    }

    pub fn eligible_voters(&self) -> &BTreeSet<String> {
        &self.eligible_voters
    }

    #[cfg(test)]
    pub fn votes(&self) -> &BTreeSet<String> {
        &self.votes
    }

    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    pub fn required_votes(&self) -> usize {
        self.required_votes
    }

    pub fn election_id(&self) -> u64 {
        self.election_id
    }

    pub fn has_passed(&self) -> bool {
        self.votes.len() >= self.required_votes
    }

    /// The only path that grows `votes`.
    pub(super) fn cast(&mut self, voter_id: &str) -> VoteOutcome {
        if !self.eligible_voters.contains(voter_id) {
            return VoteOutcome::Ineligible;
        }
        if !self.votes.insert(voter_id.to_string()) {
            return VoteOutcome::AlreadyVoted;
        }
        VoteOutcome::Accepted {
            votes: self.votes.len(),
            required: self.required_votes,
        }
    }

    /// Abort the pending expiry timer, if any.
    pub(super) fn cancel_expiry(&mut self) {
        if let Some(handle) = self.expiry.take() {
            handle.abort();
        }
    }
}
