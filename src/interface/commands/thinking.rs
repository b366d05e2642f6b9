//! # Thinking Command
//!
//! Handles `!thinking`: a small pyramid of emoji, one row per message.

use crate::domain::traits::ChatProvider;
use crate::domain::types::Invocation;
use crate::strings::messages::THINKING;
use anyhow::Result;

const PEAK: usize = 3;

/// Row widths going up to `peak` and back down: 1, 2, 3, 2, 1.
fn pyramid(peak: usize) -> Vec<usize> {
    (1..=peak).chain((1..peak).rev()).collect()
}

pub async fn handle_thinking(chat: &dyn ChatProvider, invocation: &Invocation) -> Result<()> {
    for width in pyramid(PEAK) {
        // Each row is awaited so the pyramid arrives in order.
        let row = vec![THINKING; width].join(" ");
        chat.send_message(&invocation.channel_id, &row)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    Ok(())
}
