//! # Log Strings
//!
//! Lines written to the tracing log during startup and event handling.

pub const STARTING: &str = "Starting ellesee...";
pub const CONFIG_PARSE_ERROR: &str = "Failed to parse YAML";
pub const SYNC_LOOP_START: &str = "Starting sync loop...";

pub fn config_loaded(user: &str) -> String {
    format!("Loaded configuration for user: {user}")
}

pub fn logged_in(user: &str) -> String {
    format!("Logged in as {user}")
}

pub fn set_display_name_fail(err: &str) -> String {
    format!("Failed to set display name: {err}")
}

pub fn sync_loop_fail(err: &str) -> String {
    format!("Sync loop failed: {err}")
}

pub fn invite_received(room_id: &str) -> String {
    format!("💌 Received invite for room {room_id:?}")
}

pub fn join_invite_fail(err: &str) -> String {
    format!("Failed to join room after invite: {err}")
}

pub fn route_failed(err: &str) -> String {
    format!("Failed to route message: {err}")
}
