//! # Votekick Engine
//!
//! Turns a `!votekick <mention>` invocation into one of: start a new election,
//! cast a vote on the running one, or resolve a passed election by removing the
//! target. A timer per election resolves it as expired after the configured window.
//!
//! Start and vote share one command shape, so routing is decided by whether an
//! election already exists for the (group, target) pair, never by intent.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use crate::application::eligibility;
use crate::domain::config::{AppConfig, VotekickConfig};
use crate::domain::errors::VotekickError;
use crate::domain::traits::{ChatProvider, GroupDirectory};
use crate::domain::types::{Invocation, Reply};
use crate::strings::messages;

use super::record::{ElectionKey, ElectionRecord, VoteOutcome, quorum};
use super::store::{ElectionStore, ElectionTable};

/// What a single invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reply: Reply,
    /// Set when this invocation passed the election and attempted the removal.
    pub removal: Option<Result<(), String>>,
}

impl Outcome {
    fn reply(reply: Reply) -> Self {
        Self { reply, removal: None }
    }
}

/// Result of a vote taken under the store lock, acted on after the lock is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VoteStep {
    Started { remaining: usize },
    Pending { remaining: usize },
    Passed { votes: usize, required: usize },
}

#[derive(Clone)]
pub struct VotekickEngine {
    config: VotekickConfig,
    prefix: String,
    store: Arc<ElectionStore>,
    directory: Arc<dyn GroupDirectory>,
    chat: Arc<dyn ChatProvider>,
}

impl VotekickEngine {
    pub fn new(
        config: &AppConfig,
        store: Arc<ElectionStore>,
        directory: Arc<dyn GroupDirectory>,
        chat: Arc<dyn ChatProvider>,
    ) -> Self {
        Self {
            config: config.votekick.clone(),
            prefix: config.bot.prefix.clone(),
            store,
            directory,
            chat,
        }
    }

    /// Entry point for one `!votekick` message. Every failure becomes a reply.
    pub async fn handle(
        &self,
        invocation: &Invocation,
        message: &str,
        mention: Option<String>,
    ) -> Outcome {
        match self.run(invocation, message, mention).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::info!(
                    group = %invocation.group_id,
                    author = %invocation.author_id,
                    "Votekick rejected: {}",
                    err
                );
                Outcome::reply(self.error_reply(&err))
            }
        }
    }

    async fn run(
        &self,
        invocation: &Invocation,
        message: &str,
        mention: Option<String>,
    ) -> Result<Outcome, VotekickError> {
        // Exactly `!votekick <mention>`. A structured mention is one argument
        // even when the client renders it as a multi-word display name.
        let tokens = message.split_whitespace().count();
        let shaped = match invocation.mentions.len() {
            1 => tokens >= 2,
            _ => tokens == 2,
        };
        if !shaped {
            return Err(VotekickError::Usage);
        }
        let target_id = mention.ok_or(VotekickError::Usage)?;

        let target = self
            .directory
            .fetch_target(&invocation.group_id, &target_id)
            .await
            .map_err(VotekickError::Transport)?
            .ok_or(VotekickError::TargetUnresolvable)?;
        if !target.kickable {
            return Err(VotekickError::NotKickable(target.id));
        }

        let key = ElectionKey::new(&invocation.group_id, &target.id);

        {
            let mut table = self.store.lock().await;
            if let Some(step) = Self::cast_vote(&mut table, &key, &invocation.author_id) {
                drop(table);
                return Ok(self.finish_vote(&key, step?).await);
            }
        }

        // No election yet. Membership is fetched without holding the lock.
        let voters = eligibility::resolve(self.directory.as_ref(), &invocation.group_id, true).await?;

        let mut table = self.store.lock().await;
        // Another invocation may have started this election while we were fetching.
        if let Some(step) = Self::cast_vote(&mut table, &key, &invocation.author_id) {
            drop(table);
            return Ok(self.finish_vote(&key, step?).await);
        }
        let step = self.start(&mut table, key.clone(), invocation, voters)?;
        drop(table);
        Ok(self.finish_vote(&key, step).await)
    }

    /// Vote on an existing election. `None` when no election is active for `key`.
    fn cast_vote(
        table: &mut ElectionTable<'_>,
        key: &ElectionKey,
        voter_id: &str,
    ) -> Option<Result<VoteStep, VotekickError>> {
        let outcome = table.record_vote(key, voter_id)?;
        let step = match outcome {
            VoteOutcome::AlreadyVoted => Err(VotekickError::AlreadyVoted),
            VoteOutcome::Ineligible => Err(VotekickError::IneligibleVoter),
            VoteOutcome::Accepted { votes, required } if votes >= required => {
                // Removed under the guard that counted the vote; also aborts the timer.
                table.remove(key);
                Ok(VoteStep::Passed { votes, required })
            }
            VoteOutcome::Accepted { votes, required } => {
                tracing::info!(group = %key.group_id, target = %key.target_id, voter = voter_id, votes, required, "Votekick vote accepted");
                Ok(VoteStep::Pending { remaining: required - votes })
            }
        };
        Some(step)
    }

    /// Create a record for `key` and arm its expiry timer. Runs under the store lock.
    fn start(
        &self,
        table: &mut ElectionTable<'_>,
        key: ElectionKey,
        invocation: &Invocation,
        voters: BTreeSet<String>,
    ) -> Result<VoteStep, VotekickError> {
        if voters.len() < self.config.min_voters {
            return Err(VotekickError::InsufficientVoters {
                eligible: voters.len(),
                minimum: self.config.min_voters,
            });
        }
        if !voters.contains(&invocation.author_id) {
            return Err(VotekickError::IneligibleVoter);
        }

        let required = quorum(voters.len(), self.config.quorum_percent);
        let election_id = self.store.next_election_id();
        let record = ElectionRecord::new(key.clone(), &invocation.author_id, voters, required, election_id);
        if record.has_passed() {
            return Ok(VoteStep::Passed { votes: record.vote_count(), required });
        }

        let window = Duration::from_secs(self.config.window_secs);
        let timer = tokio::spawn(self.clone().expire_after(
            key.clone(),
            election_id,
            invocation.channel_id.clone(),
            window,
        ));

        tracing::info!(
            group = %key.group_id,
            target = %key.target_id,
            initiator = %record.initiator_id(),
            eligible = record.eligible_voters().len(),
            required,
            election_id,
            "Votekick created"
        );
        table.create(record.with_expiry(timer.abort_handle()));

        // The initiator's vote is already counted.
        Ok(VoteStep::Started { remaining: required - 1 })
    }

    async fn finish_vote(&self, key: &ElectionKey, step: VoteStep) -> Outcome {
        let target = self.directory.mention(&key.target_id);
        match step {
            VoteStep::Started { remaining } => Outcome::reply(Reply::Channel(
                messages::votekick_initiated(&target, remaining, &messages::window(self.config.window_secs)),
            )),
            VoteStep::Pending { remaining } => Outcome::reply(Reply::Channel(
                messages::votes_remaining(&target, remaining),
            )),
            VoteStep::Passed { votes, required } => {
                // Removal runs outside the lock; the record is already gone either way.
                let removal = self.directory.remove_member(&key.group_id, &key.target_id).await;
                let text = match &removal {
                    Ok(()) => {
                        tracing::info!(group = %key.group_id, target = %key.target_id, votes, required, "Votekick passed");
                        messages::votekick_passed(&target)
                    }
                    Err(e) => {
                        tracing::warn!(group = %key.group_id, target = %key.target_id, error = %e, "Votekick passed but removal failed");
                        format!("{}\n{}", messages::votekick_passed(&target), messages::kick_failed(&target, e))
                    }
                };
                Outcome {
                    reply: Reply::Channel(text),
                    removal: Some(removal),
                }
            }
        }
    }

    /// Timer body: after `window`, drop the election if it is still the one this timer was armed for.
    async fn expire_after(self, key: ElectionKey, election_id: u64, channel_id: String, window: Duration) {
        tokio::time::sleep(window).await;

        let expired = {
            let mut table = self.store.lock().await;
            table.remove_if_current(&key, election_id)
        };
        let Some(record) = expired else {
            return;
        };

        tracing::info!(
            group = %key.group_id,
            target = %key.target_id,
            votes = record.vote_count(),
            required = record.required_votes(),
            "Votekick expired"
        );
        let text = messages::votekick_expired(
            &self.directory.mention(&key.target_id),
            record.vote_count(),
            record.required_votes(),
        );
        if let Err(e) = self.chat.send_message(&channel_id, &text).await {
            tracing::error!("Failed to announce votekick expiry in {}: {}", channel_id, e);
        }
    }

    fn error_reply(&self, err: &VotekickError) -> Reply {
        match err {
            VotekickError::Usage => Reply::Channel(messages::votekick_usage(
                &self.prefix,
                &self.directory.mention(&self.chat.user_id()),
            )),
            VotekickError::TargetUnresolvable => Reply::Author(messages::INVALID_USER.to_string()),
            VotekickError::NotKickable(id) => Reply::Author(messages::not_kickable(&self.directory.mention(id))),
            VotekickError::InsufficientVoters { .. } => Reply::Author(messages::NOT_ENOUGH_VOTERS.to_string()),
            VotekickError::AlreadyVoted => Reply::Author(messages::ALREADY_VOTED.to_string()),
            VotekickError::IneligibleVoter => Reply::Author(messages::NOT_ELIGIBLE.to_string()),
            VotekickError::Transport(_) => Reply::Author(messages::PLATFORM_UNAVAILABLE.to_string()),
        }
    }
}
