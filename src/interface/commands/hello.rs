//! # Hello Command
//!
//! Handles `!hello`.

use crate::domain::traits::{ChatProvider, GroupDirectory};
use crate::domain::types::{Invocation, Reply};
use anyhow::Result;

pub async fn handle_hello(
    chat: &dyn ChatProvider,
    directory: &dyn GroupDirectory,
    invocation: &Invocation,
) -> Result<()> {
    let reply = Reply::Author(crate::strings::messages::HELLO.to_string());
    super::deliver(chat, directory, invocation, &reply).await
}
