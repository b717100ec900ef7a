//! Collaborator seams between the engine and its host
//!
//! The engine never touches presentation, real storage, or real timers. It
//! talks to them through the traits here; the in-memory implementations are
//! usable both by hosts that want a trivial backend and by tests.

pub mod share;

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::snapshot::{self, SessionSnapshot};
use crate::error::PersistenceError;
use crate::types::Question;

/// External snapshot storage (browser localStorage in the original host).
///
/// Both operations are non-fatal from the engine's perspective: a failed
/// `load` falls back to defaults, a failed `save` is logged and play
/// continues.
pub trait SnapshotStore {
    fn load(&mut self) -> Result<Option<SessionSnapshot>, PersistenceError>;
    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), PersistenceError>;
}

/// Supplies questions keyed by difficulty and position in the run.
pub trait QuestionSource {
    fn question(&self, difficulty_id: &str, index: usize) -> Option<Question>;
}

/// Receives fire-and-forget time-extension requests from powerup effects.
/// The host independently calls `GameSession::timeout` when time runs out.
pub trait TimerPort {
    fn extend_time(&mut self, seconds: u32);
}

/// In-memory store keeping one encoded snapshot record.
///
/// Clones share the same backing record, so a host (or test) can hand a clone
/// to the session and still inspect what was written. The record goes through
/// the JSON codec both ways, exactly like a real flat key-value store would.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    record: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a raw record, as a previous session would have.
    pub fn with_record(record: impl Into<String>) -> Self {
        let store = Self::new();
        *store.record.borrow_mut() = Some(record.into());
        store
    }

    pub fn record(&self) -> Option<String> {
        self.record.borrow().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&mut self) -> Result<Option<SessionSnapshot>, PersistenceError> {
        match self.record.borrow().as_deref() {
            Some(raw) => snapshot::decode(raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), PersistenceError> {
        let raw = snapshot::encode(snapshot)?;
        *self.record.borrow_mut() = Some(raw);
        Ok(())
    }
}

/// Question source serving a fixed bank, the same for every difficulty.
#[derive(Debug, Default, Clone)]
pub struct FixedQuestionSource {
    questions: Vec<Question>,
}

impl FixedQuestionSource {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

impl QuestionSource for FixedQuestionSource {
    fn question(&self, _difficulty_id: &str, index: usize) -> Option<Question> {
        self.questions.get(index).cloned()
    }
}

/// Timer port recording every extension request it receives.
///
/// Clones share the recording, mirroring `MemoryStore`.
#[derive(Debug, Default, Clone)]
pub struct RecordingTimer {
    extensions: Rc<RefCell<Vec<u32>>>,
}

impl RecordingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extensions(&self) -> Vec<u32> {
        self.extensions.borrow().clone()
    }
}

impl TimerPort for RecordingTimer {
    fn extend_time(&mut self, seconds: u32) {
        self.extensions.borrow_mut().push(seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trips_through_codec() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);

        let snapshot = SessionSnapshot {
            score: 600,
            streak: 6,
            best_streak: 6,
            ..SessionSnapshot::default()
        };
        store.save(&snapshot).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.score, 600);
        assert_eq!(loaded.best_streak, 6);
    }

    #[test]
    fn test_memory_store_clone_shares_record() {
        let store = MemoryStore::new();
        let mut handle = store.clone();
        handle.save(&SessionSnapshot::default()).unwrap();
        assert!(store.record().is_some());
    }

    #[test]
    fn test_memory_store_surfaces_malformed_record() {
        let mut store = MemoryStore::with_record("{not json");
        assert!(store.load().is_err());
    }

    #[test]
    fn test_fixed_source_ignores_difficulty_and_bounds_checks() {
        let source = FixedQuestionSource::new(vec![Question::new(
            "Q0",
            vec!["a".into(), "b".into()],
            0,
        )]);
        assert!(source.question("orbit", 0).is_some());
        assert!(source.question("nebula", 0).is_some());
        assert!(source.question("orbit", 1).is_none());
    }

    #[test]
    fn test_recording_timer_accumulates_requests() {
        let timer = RecordingTimer::new();
        let mut handle = timer.clone();
        handle.extend_time(15);
        handle.extend_time(5);
        assert_eq!(timer.extensions(), vec![15, 5]);
    }
}
