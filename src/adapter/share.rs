//! Share-message composition
//!
//! The OS share sheet / clipboard fallback belongs to the host; the engine
//! only contributes the text.

use crate::config::Rank;

pub fn share_message(rank: &Rank, score: u32) -> String {
    format!(
        "I achieved {} rank with {} points in Cosmic Quiz! Can you beat my score?",
        rank.name, score
    )
}
