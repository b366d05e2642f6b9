//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.

pub const HELLO: &str = "Hello!";
pub const THINKING: &str = ":thinking:";

pub const INVALID_USER: &str = "invalid user.";
pub const ALREADY_VOTED: &str = "you have already voted in this votekick.";
pub const NOT_ELIGIBLE: &str = "you are not eligible to vote in this votekick.";
pub const NOT_ENOUGH_VOTERS: &str = "not enough eligible voters online to initiate a votekick.";
pub const PLATFORM_UNAVAILABLE: &str = "something went wrong talking to the server, try again later.";
pub const NO_QUOTES: &str = "I don't know any quotes yet.";

/// Prefix a reply with the user it is meant for.
pub fn addressed(user: &str, text: &str) -> String {
    format!("{user}: {text}")
}

pub fn quote(text: &str, author: &str) -> String {
    format!("\"{text}\" - {author}")
}

pub fn votekick_usage(prefix: &str, bot: &str) -> String {
    format!(
        "Invalid format. Messages should be written in the following format:```{prefix}votekick {bot}```"
    )
}

pub fn not_kickable(target: &str) -> String {
    format!("{target} cannot be votekicked.")
}

pub fn votekick_initiated(target: &str, remaining: usize, window: &str) -> String {
    format!("Votekick initiated for {target}. {remaining} more vote(s) within {window} required to pass.")
}

pub fn votes_remaining(target: &str, remaining: usize) -> String {
    format!("{remaining} more vote(s) required to votekick {target}.")
}

pub fn votekick_passed(target: &str) -> String {
    format!("Votekick for {target} has passed. Kicking {target}.")
}

pub fn kick_failed(target: &str, err: &str) -> String {
    format!("Failed to kick {target}: {err}")
}

pub fn votekick_expired(target: &str, votes: usize, required: usize) -> String {
    format!("Votekick for {target} has expired with {votes} of {required} required votes.")
}

/// Human wording for an expiry window, e.g. `1 minute` or `90 seconds`.
pub fn window(secs: u64) -> String {
    match secs {
        60 => "1 minute".to_string(),
        s if s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "1 second".to_string(),
        s => format!("{s} seconds"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_wording() {
        assert_eq!(window(60), "1 minute");
        assert_eq!(window(180), "3 minutes");
        assert_eq!(window(90), "90 seconds");
        assert_eq!(window(1), "1 second");
    }
}
