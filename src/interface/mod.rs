//! # Interface Layer
//!
//! User-facing command handlers invoked by the Router.

pub mod commands;
