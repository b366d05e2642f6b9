//! # Votekick Elections
//!
//! Records, the shared store, and the engine that drives each election from
//! creation to either removal of the target or expiry.

pub mod engine;
pub mod record;
pub mod store;

pub use engine::VotekickEngine;
pub use store::ElectionStore;
