//! # Votekick Errors
//!
//! Every failure an invocation of `!votekick` can hit. All of them end up as a
//! reply at the engine boundary; none propagate further.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VotekickError {
    #[error("malformed votekick command")]
    Usage,

    #[error("target is not a member of this group")]
    TargetUnresolvable,

    #[error("{0} cannot be removed by the bot")]
    NotKickable(String),

    #[error("only {eligible} eligible voters, {minimum} required")]
    InsufficientVoters { eligible: usize, minimum: usize },

    #[error("voter has already voted")]
    AlreadyVoted,

    #[error("voter is not eligible")]
    IneligibleVoter,

    #[error("platform request failed: {0}")]
    Transport(String),
}
