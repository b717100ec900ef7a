//! Cosmic Quiz session engine.
//!
//! The engine owns the quiz session state machine (welcome, difficulty
//! selection, play, results), score/streak accumulation, rank derivation,
//! powerup effects, and the persistence snapshot codec. Rendering, storage,
//! timers, and sharing are host concerns reached through the traits in
//! [`adapter`]; the host drives the engine with synchronous method calls and
//! re-renders from its accessors.

pub mod adapter;
pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use crate::config::GameConfig;
pub use crate::core::session::GameSession;
pub use crate::error::{GameError, PersistenceError};
