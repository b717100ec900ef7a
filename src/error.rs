//! Error taxonomy for the session engine
//!
//! Structural and config errors are surfaced to the caller and leave the
//! session state untouched. Persistence failures are a separate reported-only
//! type that never propagates out of the engine.

use thiserror::Error;

use crate::types::Phase;

/// Errors surfaced by `GameSession` operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("operation `{op}` is invalid in phase `{phase:?}`")]
    InvalidState { op: &'static str, phase: Phase },

    #[error("answer index {index} out of bounds for {answer_count} options")]
    InvalidAnswerIndex { index: usize, answer_count: usize },

    #[error("unknown difficulty `{0}`")]
    InvalidDifficulty(String),

    #[error("unknown powerup `{0}`")]
    UnknownPowerup(String),

    #[error("no question available for difficulty `{difficulty}` at index {index}")]
    QuestionUnavailable { difficulty: String, index: usize },

    #[error("config has no rank with a zero score threshold")]
    NoQualifyingRank,
}

/// Non-fatal persistence failure, reported through the log channel only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("persistence failure: {0}")]
pub struct PersistenceError(pub String);

impl PersistenceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = GameError::InvalidDifficulty("void".into());
        assert!(err.to_string().contains("void"));

        let err = GameError::InvalidAnswerIndex {
            index: 7,
            answer_count: 4,
        };
        assert!(err.to_string().contains('7'));
        assert!(err.to_string().contains('4'));

        let err = PersistenceError::new("quota exceeded");
        assert!(err.to_string().contains("quota exceeded"));
    }
}
