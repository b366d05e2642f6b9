//! # Votekick Command
//!
//! Handles `!votekick <mention>`.
//! Resolves the target from the message's structured mention, or from the
//! mention token in the text, and hands the invocation to the election engine.

use crate::application::election::VotekickEngine;
use crate::domain::traits::{ChatProvider, GroupDirectory};
use crate::domain::types::Invocation;
use anyhow::Result;

pub async fn handle_votekick(
    engine: &VotekickEngine,
    chat: &dyn ChatProvider,
    directory: &dyn GroupDirectory,
    invocation: &Invocation,
    message: &str,
) -> Result<()> {
    let mention = match invocation.mentions.as_slice() {
        [target] => Some(target.clone()),
        _ => message
            .split_whitespace()
            .nth(1)
            .and_then(|token| directory.parse_mention(token)),
    };
    let outcome = engine.handle(invocation, message, mention).await;
    super::deliver(chat, directory, invocation, &outcome.reply).await
}
