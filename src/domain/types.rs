//! # Domain Types
//!
//! Common data structures shared between the platform adapters and the election logic.

use serde::{Deserialize, Serialize};

/// Presence as reported by the chat platform. Only `Online` members may vote.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Presence {
    Online,
    Idle,
    Offline,
}

/// One entry of a group membership snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberSnapshot {
    pub id: String,
    pub is_bot: bool,
    pub presence: Presence,
    pub can_post_messages: bool,
}

/// A resolved votekick target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMember {
    pub id: String,
    /// Whether the bot holds enough privilege to remove this member.
    pub kickable: bool,
}

/// Where an incoming command came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub group_id: String,
    pub channel_id: String,
    pub author_id: String,
    /// Member ids the platform attached to the message as structured mentions.
    /// Their rendering in the message text is client-specific.
    pub mentions: Vec<String>,
}

/// Who a reply is meant for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Addressed to the command author only.
    Author(String),
    /// Broadcast to the originating channel.
    Channel(String),
}

impl Reply {
    #[cfg(test)]
    pub fn text(&self) -> &str {
        match self {
            Reply::Author(text) | Reply::Channel(text) => text,
        }
    }
}
