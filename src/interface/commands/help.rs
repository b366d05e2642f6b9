//! # Help Command
//!
//! Handles the `!help` command.
//! Displays the main help menu to the user.

use crate::domain::traits::ChatProvider;
use crate::domain::types::Invocation;
use anyhow::Result;

pub async fn handle_help(chat: &dyn ChatProvider, invocation: &Invocation, prefix: &str) -> Result<()> {
    chat.send_message(&invocation.channel_id, &crate::strings::help::main(prefix))
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}
