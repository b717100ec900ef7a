//! Core engine: session state machine, scoring, powerups, snapshot codec

pub mod powerup;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use powerup::{PowerupEffect, PowerupOutcome, PowerupRegistry};
pub use scoring::{calculate_rank, ScoreUpdate};
pub use session::GameSession;
pub use snapshot::SessionSnapshot;
