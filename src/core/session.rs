//! Session module - the quiz session state machine
//!
//! `GameSession` owns all mutable state and exposes the synchronous API the
//! host UI drives: difficulty selection, answer submission, advancing,
//! powerups, timeouts, reset. Every operation runs to completion; failed
//! operations leave the state untouched. Persistence is fire-and-forget:
//! a snapshot is emitted after every score/streak mutation and on reset,
//! and store failures are logged, never propagated.

use std::collections::{BTreeMap, BTreeSet};

use crate::adapter::{share, QuestionSource, SnapshotStore, TimerPort};
use crate::config::{GameConfig, Rank};
use crate::core::powerup::{self, EffectContext, PowerupOutcome, PowerupRegistry};
use crate::core::scoring;
use crate::core::snapshot::SessionSnapshot;
use crate::error::GameError;
use crate::types::{
    AnswerOutcome, Phase, Question, QuestionState, TimeoutOutcome, TOTAL_QUESTIONS,
};

pub struct GameSession {
    config: GameConfig,
    powerups: PowerupRegistry,
    source: Box<dyn QuestionSource>,
    store: Box<dyn SnapshotStore>,
    timer: Box<dyn TimerPort>,
    phase: Phase,
    question_state: QuestionState,
    current_question: usize,
    question: Option<Question>,
    score: u32,
    streak: u32,
    best_streak: u32,
    active_powerups: BTreeMap<String, u32>,
    achievements: BTreeSet<String>,
    difficulty: Option<String>,
}

impl GameSession {
    /// Create a session with the built-in powerup registry.
    ///
    /// The config is validated eagerly; a rank table without a zero
    /// threshold is rejected here rather than at results time. Previously
    /// persisted meta-progress (best streak, achievements) is resumed from
    /// the store; a missing or malformed record falls back to defaults.
    pub fn new(
        config: GameConfig,
        source: Box<dyn QuestionSource>,
        store: Box<dyn SnapshotStore>,
        timer: Box<dyn TimerPort>,
    ) -> Result<Self, GameError> {
        Self::with_registry(config, PowerupRegistry::builtin(), source, store, timer)
    }

    pub fn with_registry(
        config: GameConfig,
        powerups: PowerupRegistry,
        source: Box<dyn QuestionSource>,
        store: Box<dyn SnapshotStore>,
        timer: Box<dyn TimerPort>,
    ) -> Result<Self, GameError> {
        config.validate()?;

        let mut session = Self {
            config,
            powerups,
            source,
            store,
            timer,
            phase: Phase::Welcome,
            question_state: QuestionState::QuestionDisplayed,
            current_question: 0,
            question: None,
            score: 0,
            streak: 0,
            best_streak: 0,
            active_powerups: BTreeMap::new(),
            achievements: BTreeSet::new(),
            difficulty: None,
        };

        match session.store.load() {
            Ok(Some(snapshot)) => {
                session.best_streak = snapshot.best_streak;
                session.achievements = snapshot.achievements;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("failed to load session snapshot, starting fresh: {e}");
            }
        }

        Ok(session)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Sub-state of the current question; meaningful only while `Playing`.
    pub fn question_state(&self) -> QuestionState {
        self.question_state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Index of the current question, in `[0, TOTAL_QUESTIONS]`.
    pub fn current_index(&self) -> usize {
        self.current_question
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }

    pub fn active_powerups(&self) -> &BTreeMap<String, u32> {
        &self.active_powerups
    }

    pub fn achievements(&self) -> &BTreeSet<String> {
        &self.achievements
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Rank earned by the current score.
    pub fn rank(&self) -> Result<&Rank, GameError> {
        scoring::calculate_rank(&self.config.ranks, self.score)
    }

    /// Share text for the current rank and score.
    pub fn share_message(&self) -> Result<String, GameError> {
        Ok(share::share_message(self.rank()?, self.score))
    }

    /// Pick a difficulty and start a run at question 0.
    ///
    /// Valid from `Welcome`, or from `Finished` as a combined reset-and-start
    /// (best streak and achievements are preserved either way).
    pub fn select_difficulty(&mut self, difficulty_id: &str) -> Result<(), GameError> {
        if !matches!(self.phase, Phase::Welcome | Phase::Finished) {
            return Err(GameError::InvalidState {
                op: "select_difficulty",
                phase: self.phase,
            });
        }
        if self.config.difficulty(difficulty_id).is_none() {
            return Err(GameError::InvalidDifficulty(difficulty_id.to_string()));
        }

        self.clear_run_state();
        self.difficulty = Some(difficulty_id.to_string());
        self.phase = Phase::DifficultySelected;
        self.load_question(0)?;
        self.phase = Phase::Playing;
        self.question_state = QuestionState::QuestionDisplayed;
        tracing::debug!("run started at difficulty `{difficulty_id}`");
        Ok(())
    }

    /// Submit an answer for the displayed question.
    ///
    /// Score/streak updates and the transition to `AnswerSubmitted` happen
    /// together; a second submission for the same question is rejected as an
    /// invalid-state call.
    pub fn submit_answer(&mut self, answer_index: usize) -> Result<AnswerOutcome, GameError> {
        if self.phase != Phase::Playing
            || self.question_state != QuestionState::QuestionDisplayed
        {
            return Err(GameError::InvalidState {
                op: "submit_answer",
                phase: self.phase,
            });
        }
        let Some(question) = self.question.as_ref() else {
            return Err(GameError::InvalidState {
                op: "submit_answer",
                phase: self.phase,
            });
        };
        if answer_index >= question.answers.len() {
            return Err(GameError::InvalidAnswerIndex {
                index: answer_index,
                answer_count: question.answers.len(),
            });
        }

        let correct = answer_index == question.correct;
        let multiplier = self
            .difficulty
            .as_deref()
            .map_or(1, |id| self.config.multiplier_for(id));
        let update =
            scoring::score_answer(correct, multiplier, self.score, self.streak, self.best_streak);

        self.score = update.score;
        self.streak = update.streak;
        self.best_streak = update.best_streak;
        self.question_state = QuestionState::AnswerSubmitted;
        self.persist();

        Ok(AnswerOutcome {
            correct: update.correct,
            awarded: update.awarded,
            score: update.score,
            streak: update.streak,
            best_streak: update.best_streak,
        })
    }

    /// Move to the next question, or finish the run after the last one.
    pub fn advance(&mut self) -> Result<Phase, GameError> {
        if self.phase != Phase::Playing
            || self.question_state != QuestionState::AnswerSubmitted
        {
            return Err(GameError::InvalidState {
                op: "advance",
                phase: self.phase,
            });
        }

        let next = self.current_question + 1;
        if next >= TOTAL_QUESTIONS {
            self.current_question = TOTAL_QUESTIONS;
            self.finish();
            return Ok(Phase::Finished);
        }

        self.load_question(next)?;
        self.question_state = QuestionState::QuestionDisplayed;
        Ok(Phase::Playing)
    }

    /// Handle question-time expiry reported by the host's timer.
    ///
    /// An armed shield absorbs the timeout: one charge is spent and a grace
    /// extension is requested instead of ending the run.
    pub fn timeout(&mut self) -> Result<TimeoutOutcome, GameError> {
        if self.phase != Phase::Playing
            || self.question_state != QuestionState::QuestionDisplayed
        {
            return Err(GameError::InvalidState {
                op: "timeout",
                phase: self.phase,
            });
        }

        if powerup::consume_shield(&mut self.active_powerups, self.timer.as_mut()) {
            tracing::debug!("shield absorbed a timeout");
            return Ok(TimeoutOutcome::ShieldAbsorbed);
        }

        self.finish();
        Ok(TimeoutOutcome::SessionEnded)
    }

    /// Apply a powerup effect. Valid only while `Playing`.
    ///
    /// An unrecognized id is an error with no state change; callers treat it
    /// as non-fatal.
    pub fn use_powerup(&mut self, powerup_id: &str) -> Result<PowerupOutcome, GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::InvalidState {
                op: "use_powerup",
                phase: self.phase,
            });
        }
        let Some(effect) = self.powerups.get(powerup_id) else {
            return Err(GameError::UnknownPowerup(powerup_id.to_string()));
        };
        let Some(question) = self.question.as_ref() else {
            return Err(GameError::InvalidState {
                op: "use_powerup",
                phase: self.phase,
            });
        };

        let mut ctx = EffectContext {
            question,
            charges: &mut self.active_powerups,
            timer: self.timer.as_mut(),
        };
        Ok(effect.apply(&mut ctx))
    }

    /// Return to `Welcome`, clearing run-local state.
    ///
    /// Best streak and achievements survive; valid only from `Finished`.
    pub fn reset(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::Finished {
            return Err(GameError::InvalidState {
                op: "reset",
                phase: self.phase,
            });
        }
        self.clear_run_state();
        self.phase = Phase::Welcome;
        self.persist();
        tracing::debug!("session reset to welcome");
        Ok(())
    }

    /// Snapshot of the persistent state fields.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_question: self.current_question,
            score: self.score,
            streak: self.streak,
            best_streak: self.best_streak,
            active_powerups: self.active_powerups.clone(),
            achievements: self.achievements.clone(),
            difficulty: self.difficulty.clone(),
            ..SessionSnapshot::default()
        }
    }

    fn clear_run_state(&mut self) {
        self.score = 0;
        self.streak = 0;
        self.active_powerups.clear();
        self.difficulty = None;
        self.current_question = 0;
        self.question = None;
        self.question_state = QuestionState::QuestionDisplayed;
    }

    /// Fetch and display the question at `index`.
    ///
    /// A missing question ends the run early with a controlled transition to
    /// `Finished`; the error is still surfaced to the caller.
    fn load_question(&mut self, index: usize) -> Result<(), GameError> {
        let difficulty = self.difficulty.clone().unwrap_or_default();
        match self.source.question(&difficulty, index) {
            Some(question) => {
                self.current_question = index;
                self.question = Some(question);
                Ok(())
            }
            None => {
                self.finish();
                Err(GameError::QuestionUnavailable { difficulty, index })
            }
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        self.question = None;
        self.persist();
        tracing::debug!(
            "run finished: score={} best_streak={}",
            self.score,
            self.best_streak
        );
    }

    fn persist(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.store.save(&snapshot) {
            tracing::warn!("failed to save session snapshot: {e}");
        }
    }
}
