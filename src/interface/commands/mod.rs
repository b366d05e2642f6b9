//! # Command Handlers
//!
//! Contains specific handler functions for each supported command (e.g. !hello, !votekick).
//! These handlers are invoked by the Router.

pub mod hello;
pub mod help;
pub mod quote;
pub mod thinking;
pub mod votekick;

use anyhow::Result;

use crate::domain::traits::{ChatProvider, GroupDirectory};
use crate::domain::types::{Invocation, Reply};
use crate::strings::messages;

/// Post a reply in the channel the command came from.
pub async fn deliver(
    chat: &dyn ChatProvider,
    directory: &dyn GroupDirectory,
    invocation: &Invocation,
    reply: &Reply,
) -> Result<()> {
    let text = match reply {
        Reply::Author(text) => messages::addressed(&directory.mention(&invocation.author_id), text),
        Reply::Channel(text) => text.clone(),
    };
    chat.send_message(&invocation.channel_id, &text)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}
