//! # Application Layer
//!
//! Contains the core business logic and orchestration of the bot.
//! This includes command routing, the votekick elections, and logging setup.

pub mod election;
pub mod eligibility;
pub mod logging;
pub mod parsing;
pub mod quotes;
pub mod router;

#[cfg(test)]
pub mod testing;
