//! # Domain Traits
//!
//! Abstract interfaces for the chat platform.
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;

use crate::domain::types::{MemberSnapshot, TargetMember};

/// Abstract interface for a Chat Provider (e.g., Matrix, Slack, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to a channel addressed by id, returning the new event id
    async fn send_message(&self, channel_id: &str, content: &str) -> Result<String, String>;

    /// The bot's own user id
    fn user_id(&self) -> String;
}

/// Membership, permission and moderation lookups for a group.
#[async_trait]
pub trait GroupDirectory: Send + Sync {
    /// Membership + presence + permission snapshot of the group
    async fn fetch_members(&self, group_id: &str) -> Result<Vec<MemberSnapshot>, String>;

    /// Resolve a single member; `Ok(None)` when the id is not a member of the group
    async fn fetch_target(
        &self,
        group_id: &str,
        member_id: &str,
    ) -> Result<Option<TargetMember>, String>;

    /// Remove a member from the group
    async fn remove_member(&self, group_id: &str, member_id: &str) -> Result<(), String>;

    /// Extract a member id from a mention token
    fn parse_mention(&self, token: &str) -> Option<String> {
        crate::application::parsing::parse_mention(token)
    }

    /// Render a member id as a mention in outgoing text
    fn mention(&self, member_id: &str) -> String {
        format!("<@{member_id}>")
    }
}
