//! # Quote Command
//!
//! Handles `!quote`: posts a random entry of the quote seed file.

use crate::application::quotes;
use crate::domain::traits::{ChatProvider, GroupDirectory};
use crate::domain::types::{Invocation, Reply};
use crate::strings::messages;
use anyhow::Result;

pub async fn handle_quote(
    chat: &dyn ChatProvider,
    directory: &dyn GroupDirectory,
    invocation: &Invocation,
    seed_path: &str,
) -> Result<()> {
    let reply = match quotes::load(seed_path).await {
        Ok(book) => match quotes::pick(&book) {
            Some(q) => Reply::Channel(messages::quote(&q.quote, &q.author)),
            None => Reply::Author(messages::NO_QUOTES.to_string()),
        },
        Err(e) => {
            tracing::warn!("{:#}", e);
            Reply::Author(messages::NO_QUOTES.to_string())
        }
    };
    super::deliver(chat, directory, invocation, &reply).await
}
