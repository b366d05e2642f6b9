//! # Matrix Service Adapter
//!
//! Implements `ChatProvider` and `GroupDirectory` for the Matrix protocol using the `matrix_sdk`.
//! A Matrix room is both the group and the channel: membership, power levels and
//! kicks are all scoped to the room.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use matrix_sdk::room::Room;
use matrix_sdk::ruma::api::client::presence::get_presence;
use matrix_sdk::ruma::events::MessageLikeEventType;
use matrix_sdk::ruma::events::room::member::MembershipState;
use matrix_sdk::ruma::events::room::message::RoomMessageEventContent;
use matrix_sdk::ruma::presence::PresenceState;
use matrix_sdk::ruma::{RoomId, UserId};
use matrix_sdk::{Client, RoomMemberships};
use std::collections::HashSet;
use std::future::Future;

use crate::application::parsing;
use crate::domain::traits::{ChatProvider, GroupDirectory};
use crate::domain::types::{MemberSnapshot, Presence, TargetMember};

const KICK_REASON: &str = "Votekick passed";
const MATRIX_TO: &str = "https://matrix.to/#/";
/// Upper bound on presence requests in flight for one membership snapshot.
const PRESENCE_CONCURRENCY: usize = 8;

#[derive(Clone)]
pub struct MatrixService {
    client: Client,
    bots: HashSet<String>,
}

impl MatrixService {
    pub fn new(client: Client, bots: impl IntoIterator<Item = String>) -> Self {
        Self {
            client,
            bots: bots.into_iter().collect(),
        }
    }

    fn room(&self, room_id: &str) -> Result<Room, String> {
        let room_id = <&RoomId>::try_from(room_id).map_err(|e| e.to_string())?;
        self.client
            .get_room(room_id)
            .ok_or_else(|| format!("Unknown room {room_id}"))
    }

    fn is_bot(&self, user_id: &UserId) -> bool {
        self.client.user_id() == Some(user_id) || self.bots.contains(user_id.as_str())
    }

    async fn presence(&self, user_id: &UserId) -> Result<Presence, String> {
        let request = get_presence::v3::Request::new(user_id.to_owned());
        let response = self.client.send(request).await.map_err(|e| e.to_string())?;
        Ok(presence_from(&response.presence))
    }
}

fn presence_from(state: &PresenceState) -> Presence {
    match state {
        PresenceState::Online => Presence::Online,
        PresenceState::Unavailable => Presence::Idle,
        _ => Presence::Offline,
    }
}

/// Runs `lookup` over `items` with at most `limit` lookups in flight.
async fn bounded<I, F, Fut>(items: I, limit: usize, lookup: F) -> Vec<Fut::Output>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future,
{
    stream::iter(items).map(lookup).buffer_unordered(limit).collect().await
}

#[async_trait]
impl ChatProvider for MatrixService {
    async fn send_message(&self, channel_id: &str, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", channel_id, content);
        self.room(channel_id)?
            .send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    fn user_id(&self) -> String {
        self.client
            .user_id()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }
}

#[async_trait]
impl GroupDirectory for MatrixService {
    async fn fetch_members(&self, group_id: &str) -> Result<Vec<MemberSnapshot>, String> {
        let room = self.room(group_id)?;
        let power_levels = room.power_levels().await.map_err(|e| e.to_string())?;
        let members = room
            .members(RoomMemberships::JOIN)
            .await
            .map_err(|e| e.to_string())?;

        // Presence is a per-user lookup. A member whose presence cannot be read
        // counts as offline rather than failing the whole snapshot.
        let power_levels = &power_levels;
        let snapshot = bounded(members, PRESENCE_CONCURRENCY, |member| async move {
            let user_id = member.user_id();
            let presence = self.presence(user_id).await.unwrap_or_else(|e| {
                tracing::warn!("Presence lookup for {} failed: {}", user_id, e);
                Presence::Offline
            });
            MemberSnapshot {
                id: user_id.to_string(),
                is_bot: self.is_bot(user_id),
                presence,
                can_post_messages: power_levels
                    .user_can_send_message(user_id, MessageLikeEventType::RoomMessage),
            }
        })
        .await;
        Ok(snapshot)
    }

    async fn fetch_target(
        &self,
        group_id: &str,
        member_id: &str,
    ) -> Result<Option<TargetMember>, String> {
        let Ok(user_id) = <&UserId>::try_from(member_id) else {
            return Ok(None);
        };
        let room = self.room(group_id)?;
        let member = room.get_member(user_id).await.map_err(|e| e.to_string())?;
        let Some(member) = member.filter(|m| *m.membership() == MembershipState::Join) else {
            return Ok(None);
        };

        let own_id = self
            .client
            .user_id()
            .ok_or_else(|| "Client is not logged in".to_string())?;
        let power_levels = room.power_levels().await.map_err(|e| e.to_string())?;

        Ok(Some(TargetMember {
            id: member.user_id().to_string(),
            kickable: power_levels.user_can_kick_user(own_id, user_id),
        }))
    }

    async fn remove_member(&self, group_id: &str, member_id: &str) -> Result<(), String> {
        let user_id = <&UserId>::try_from(member_id).map_err(|e| e.to_string())?;
        self.room(group_id)?
            .kick_user(user_id, Some(KICK_REASON))
            .await
            .map_err(|e| e.to_string())
    }

    /// Accepts a bare user id (`@alice:example.org`), a matrix.to link, or a `<@id>` mention.
    fn parse_mention(&self, token: &str) -> Option<String> {
        let candidate = token.strip_prefix(MATRIX_TO).unwrap_or(token);
        match UserId::parse(candidate) {
            Ok(user_id) => Some(user_id.to_string()),
            Err(_) => parsing::parse_mention(token),
        }
    }

    /// Matrix clients linkify bare user ids.
    fn mention(&self, member_id: &str) -> String {
        member_id.to_string()
    }
}
