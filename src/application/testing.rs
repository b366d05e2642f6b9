//! In-memory platform double shared by the unit tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::application::election::{ElectionStore, VotekickEngine};
use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatProvider, GroupDirectory};
use crate::domain::types::{Invocation, MemberSnapshot, Presence, TargetMember};

pub const BOT_ID: &str = "bot";

pub fn member(id: &str, is_bot: bool, presence: Presence, can_post_messages: bool) -> MemberSnapshot {
    MemberSnapshot {
        id: id.to_string(),
        is_bot,
        presence,
        can_post_messages,
    }
}

pub fn config() -> AppConfig {
    AppConfig::parse(
        "services:\n  matrix:\n    username: bot\n    password: pw\n    homeserver: https://example.org\n",
    )
    .unwrap()
}

pub fn invocation(group: &str, author: &str) -> Invocation {
    Invocation {
        group_id: group.to_string(),
        channel_id: format!("{group}-general"),
        author_id: author.to_string(),
        mentions: Vec::new(),
    }
}

/// An invocation whose message carries structured mentions of `mentions`.
pub fn invocation_mentioning(group: &str, author: &str, mentions: &[&str]) -> Invocation {
    Invocation {
        mentions: mentions.iter().map(|id| id.to_string()).collect(),
        ..invocation(group, author)
    }
}

pub fn engine(platform: &Arc<FakePlatform>) -> (VotekickEngine, Arc<ElectionStore>) {
    let store = Arc::new(ElectionStore::new());
    let engine = VotekickEngine::new(&config(), store.clone(), platform.clone(), platform.clone());
    (engine, store)
}

#[derive(Default)]
pub struct FakePlatform {
    members: Mutex<Vec<MemberSnapshot>>,
    unkickable: Mutex<HashSet<String>>,
    fetch_error: Mutex<Option<String>>,
    kick_error: Mutex<Option<String>>,
    removed: Mutex<Vec<(String, String)>>,
    sent: Mutex<Vec<(String, String)>>,
    member_fetches: AtomicUsize,
}

impl FakePlatform {
    pub fn with_online_voters(ids: &[&str]) -> Self {
        let platform = Self::default();
        for id in ids {
            platform.add_member(member(id, false, Presence::Online, true));
        }
        platform
    }

    pub fn add_member(&self, member: MemberSnapshot) {
        self.members.lock().unwrap().push(member);
    }

    pub fn set_unkickable(&self, id: &str) {
        self.unkickable.lock().unwrap().insert(id.to_string());
    }

    pub fn fail_member_fetch(&self, err: &str) {
        *self.fetch_error.lock().unwrap() = Some(err.to_string());
    }

    pub fn fail_kick(&self, err: &str) {
        *self.kick_error.lock().unwrap() = Some(err.to_string());
    }

    pub fn removed(&self) -> Vec<(String, String)> {
        self.removed.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn member_fetches(&self) -> usize {
        self.member_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatProvider for FakePlatform {
    async fn send_message(&self, channel_id: &str, content: &str) -> Result<String, String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((channel_id.to_string(), content.to_string()));
        Ok(format!("event-{}", sent.len()))
    }

    fn user_id(&self) -> String {
        BOT_ID.to_string()
    }
}

#[async_trait]
impl GroupDirectory for FakePlatform {
    async fn fetch_members(&self, _group_id: &str) -> Result<Vec<MemberSnapshot>, String> {
        self.member_fetches.fetch_add(1, Ordering::SeqCst);
        // Give concurrent invocations a chance to interleave here.
        tokio::task::yield_now().await;
        if let Some(err) = self.fetch_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.members.lock().unwrap().clone())
    }

    async fn fetch_target(&self, _group_id: &str, member_id: &str) -> Result<Option<TargetMember>, String> {
        let known = self.members.lock().unwrap().iter().any(|m| m.id == member_id);
        if !known {
            return Ok(None);
        }
        Ok(Some(TargetMember {
            id: member_id.to_string(),
            kickable: !self.unkickable.lock().unwrap().contains(member_id),
        }))
    }

    async fn remove_member(&self, group_id: &str, member_id: &str) -> Result<(), String> {
        self.removed.lock().unwrap().push((group_id.to_string(), member_id.to_string()));
        if let Some(err) = self.kick_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.members.lock().unwrap().retain(|m| m.id != member_id);
        Ok(())
    }
}
