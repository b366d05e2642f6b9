//! # Parsing Utils
//!
//! Helpers for splitting raw chat text into a command name and arguments,
//! and for extracting member ids from mention tokens.

use regex::Regex;
use std::sync::LazyLock;

static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<@!?(\d+)>").expect("mention pattern is valid"));

/// Parse an id from a mention token in the form `<@123>` or `<@!123>`.
pub fn parse_mention(token: &str) -> Option<String> {
    match MENTION.captures(token).and_then(|caps| caps.get(1)) {
        Some(id) => Some(id.as_str().to_string()),
        None => {
            tracing::debug!("Invalid user from message part format: {:?}", token);
            None
        }
    }
}

/// Split `!name rest of args` into `("name", "rest of args")`.
/// Returns `None` when the message does not start with `prefix`.
pub fn split_command<'a>(message: &'a str, prefix: &str) -> Option<(&'a str, &'a str)> {
    let msg = message.trim().strip_prefix(prefix)?;
    let (cmd, args) = match msg.find(char::is_whitespace) {
        Some(idx) => (&msg[..idx], msg[idx..].trim()),
        None => (msg, ""),
    };
    if cmd.is_empty() {
        return None;
    }
    Some((cmd, args))
}
