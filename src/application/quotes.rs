//! # Quote Book
//!
//! Loads the quote seed file (a JSON array) and picks a random entry.

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteRecord {
    pub author: String,
    pub quote: String,
}

/// Read the seed on every call so edits are picked up without a restart.
pub async fn load(path: impl AsRef<Path>) -> Result<Vec<QuoteRecord>> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read quotes from {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse quotes in {}", path.display()))
}

pub fn pick(quotes: &[QuoteRecord]) -> Option<&QuoteRecord> {
    quotes.choose(&mut rand::thread_rng())
}
