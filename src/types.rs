//! Core types shared across the engine
//! This module contains pure data types with no heavy external dependencies

use serde::{Deserialize, Serialize};

/// Number of questions in a run. Reaching this index ends the run.
pub const TOTAL_QUESTIONS: usize = 10;

/// Points awarded per correct answer before the difficulty multiplier.
pub const BASE_POINTS: u32 = 100;

/// Seconds requested from the timer by the time-dilation powerup.
pub const TIME_DILATION_SECS: u32 = 15;

/// Grace seconds requested when a shield charge absorbs a timeout.
pub const SHIELD_GRACE_SECS: u32 = 5;

/// Maximum incorrect options eliminated by the hint powerup.
pub const HINT_ELIMINATIONS: usize = 2;

/// Coarse session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Welcome,
    DifficultySelected,
    Playing,
    Finished,
}

impl Phase {
    /// Parse phase from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "welcome" => Some(Phase::Welcome),
            "difficultyselected" => Some(Phase::DifficultySelected),
            "playing" => Some(Phase::Playing),
            "finished" => Some(Phase::Finished),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Welcome => "welcome",
            Phase::DifficultySelected => "difficultySelected",
            Phase::Playing => "playing",
            Phase::Finished => "finished",
        }
    }
}

/// Per-question sub-state while `Phase::Playing`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionState {
    QuestionDisplayed,
    AnswerSubmitted,
}

/// A single quiz question as served by the question source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    /// Answer options in display order.
    pub answers: Vec<String>,
    /// Index into `answers` of the correct option.
    pub correct: usize,
}

impl Question {
    pub fn new(text: impl Into<String>, answers: Vec<String>, correct: usize) -> Self {
        Self {
            text: text.into(),
            answers,
            correct,
        }
    }
}

/// Result of a `submit_answer` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Points added to the score by this answer (0 on a miss).
    pub awarded: u32,
    pub score: u32,
    pub streak: u32,
    pub best_streak: u32,
}

/// Result of a `timeout` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutOutcome {
    /// A shield charge was consumed and a grace extension requested.
    ShieldAbsorbed,
    /// No shield was armed; the run ended.
    SessionEnded,
}
