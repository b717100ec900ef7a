//! Session snapshot and the flat JSON codec
//!
//! The snapshot mirrors the persistent fields of the session state. Phase and
//! the currently displayed question are transient and never serialized. The
//! `version` field is carried for the store's benefit; unknown fields in a
//! record are ignored so older engines tolerate newer records.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    pub current_question: usize,
    pub score: u32,
    pub streak: u32,
    pub best_streak: u32,
    /// Powerup id to remaining charges.
    #[serde(default)]
    pub active_powerups: BTreeMap<String, u32>,
    #[serde(default)]
    pub achievements: BTreeSet<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            current_question: 0,
            score: 0,
            streak: 0,
            best_streak: 0,
            active_powerups: BTreeMap::new(),
            achievements: BTreeSet::new(),
            difficulty: None,
        }
    }
}

pub fn encode(snapshot: &SessionSnapshot) -> Result<String, PersistenceError> {
    serde_json::to_string(snapshot).map_err(|e| PersistenceError::new(e.to_string()))
}

pub fn decode(raw: &str) -> Result<SessionSnapshot, PersistenceError> {
    serde_json::from_str(raw).map_err(|e| PersistenceError::new(e.to_string()))
}
