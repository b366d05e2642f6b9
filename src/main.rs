//! # Main Entry Point
//!
//! Initializes the application:
//! - Domain: Configuration, Types and Traits
//! - Infrastructure: Matrix
//! - Application: Router, Elections, Logging
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::Result;
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::{MessageType, SyncRoomMessageEvent},
    },
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::application::election::{ElectionStore, VotekickEngine};
use crate::application::router::CommandRouter;
use crate::domain::config::AppConfig;
use crate::domain::types::Invocation;
use crate::infrastructure::matrix::MatrixService;
use crate::strings::logs;

#[derive(Debug, Parser)]
#[command(name = "ellesee", about = "Chat bot with votekick elections")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "data/config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&cli.config)?;

    // 2. Logging Setup
    let _log_guard = application::logging::init(&config.system)?;
    tracing::info!("{}", logs::STARTING);
    tracing::info!("{}", logs::config_loaded(&config.services.matrix.username));

    // 3. Matrix Setup
    let client = Client::builder()
        .homeserver_url(&config.services.matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(
            &config.services.matrix.username,
            &config.services.matrix.password,
        )
        .send()
        .await?;

    tracing::info!("{}", logs::logged_in(&config.services.matrix.username));

    if let Some(name) = &config.services.matrix.display_name {
        if let Err(e) = client.account().set_display_name(Some(name.as_str())).await {
            tracing::warn!("{}", logs::set_display_name_fail(&e.to_string()));
        }
    }

    // 4. Application Components
    // One store for the whole process; every election lives here.
    let platform = Arc::new(MatrixService::new(client.clone(), config.bot.bots.clone()));
    let store = Arc::new(ElectionStore::new());
    let engine = VotekickEngine::new(&config, store, platform.clone(), platform.clone());
    let router = Arc::new(CommandRouter::new(
        config.clone(),
        platform.clone(),
        platform.clone(),
        engine,
    ));

    // 5. Event Handlers
    let start_time = SystemTime::now();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let router = router.clone();
        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time = UNIX_EPOCH + Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }

            let MessageType::Text(text_content) = &original_msg.content.msgtype else {
                return;
            };
            if original_msg.sender == room.own_user_id() {
                return;
            }
            tracing::debug!("Received message from {}: {}", original_msg.sender, text_content.body);

            let invocation = Invocation {
                group_id: room.room_id().to_string(),
                channel_id: room.room_id().to_string(),
                author_id: original_msg.sender.to_string(),
                mentions: original_msg
                    .content
                    .mentions
                    .as_ref()
                    .map(|m| m.user_ids.iter().map(|id| id.to_string()).collect())
                    .unwrap_or_default(),
            };
            let body = text_content.body.clone();

            // Commands run concurrently; the election store serializes what must be.
            tokio::spawn(async move {
                if let Err(e) = router.route(&invocation, &body).await {
                    tracing::error!("{}", logs::route_failed(&e.to_string()));
                }
            });
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            tracing::info!("{}", logs::invite_received(room.room_id().as_str()));
            if let Err(e) = room.join().await {
                tracing::warn!("{}", logs::join_invite_fail(&e.to_string()));
            }
        }
    });

    // 6. Sync Loop
    tracing::info!("{}", logs::SYNC_LOOP_START);
    if let Err(e) = client.sync(SyncSettings::default()).await {
        tracing::error!("{}", logs::sync_loop_fail(&e.to_string()));
        return Err(e.into());
    }

    Ok(())
}
