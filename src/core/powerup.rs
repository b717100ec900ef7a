//! Powerup effect resolver
//!
//! Effects implement a uniform capability trait and are looked up in a
//! registry keyed by id, so new powerups slot in without touching the
//! dispatch path. Effects may request time from the timer port, compute
//! hints from the current question, or arm charges in the session's
//! powerup map; they never touch score or streak.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::adapter::TimerPort;
use crate::types::{Question, HINT_ELIMINATIONS, SHIELD_GRACE_SECS, TIME_DILATION_SECS};

pub const TIME_DILATION_ID: &str = "time-dilation";
pub const QUANTUM_HINT_ID: &str = "quantum-hint";
pub const COSMIC_SHIELD_ID: &str = "cosmic-shield";

/// Key under which shield charges are stored in the active-powerup map.
pub const SHIELD_KEY: &str = "shield";

/// What a powerup did, for the UI layer to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PowerupOutcome {
    /// A time extension was requested from the timer collaborator.
    TimeExtended { seconds: u32 },
    /// These option indices should be disabled in the answer list.
    OptionsEliminated(ArrayVec<usize, HINT_ELIMINATIONS>),
    /// A shield is armed with this many charges.
    ShieldArmed { charges: u32 },
}

/// Mutable view of the session handed to an effect.
pub struct EffectContext<'a> {
    pub question: &'a Question,
    /// Powerup id to remaining charges.
    pub charges: &'a mut BTreeMap<String, u32>,
    pub timer: &'a mut dyn TimerPort,
}

pub trait PowerupEffect {
    fn id(&self) -> &'static str;
    fn apply(&self, ctx: &mut EffectContext<'_>) -> PowerupOutcome;
}

/// Requests a fixed time extension; session state is untouched.
pub struct TimeDilation;

impl PowerupEffect for TimeDilation {
    fn id(&self) -> &'static str {
        TIME_DILATION_ID
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> PowerupOutcome {
        ctx.timer.extend_time(TIME_DILATION_SECS);
        PowerupOutcome::TimeExtended {
            seconds: TIME_DILATION_SECS,
        }
    }
}

/// Deterministically eliminates the first incorrect options in display order.
pub struct QuantumHint;

impl PowerupEffect for QuantumHint {
    fn id(&self) -> &'static str {
        QUANTUM_HINT_ID
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> PowerupOutcome {
        let mut eliminated = ArrayVec::new();
        for index in 0..ctx.question.answers.len() {
            if eliminated.is_full() {
                break;
            }
            if index != ctx.question.correct {
                eliminated.push(index);
            }
        }
        PowerupOutcome::OptionsEliminated(eliminated)
    }
}

/// Arms a single-charge shield, consumed by the session on timeout.
pub struct CosmicShield;

impl PowerupEffect for CosmicShield {
    fn id(&self) -> &'static str {
        COSMIC_SHIELD_ID
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> PowerupOutcome {
        ctx.charges.insert(SHIELD_KEY.to_string(), 1);
        PowerupOutcome::ShieldArmed { charges: 1 }
    }
}

/// Registry mapping powerup ids to their effects.
pub struct PowerupRegistry {
    effects: Vec<Box<dyn PowerupEffect>>,
}

impl PowerupRegistry {
    pub fn empty() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Registry with the three built-in effects.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(TimeDilation));
        registry.register(Box::new(QuantumHint));
        registry.register(Box::new(CosmicShield));
        registry
    }

    /// Register an effect, replacing any existing effect with the same id.
    pub fn register(&mut self, effect: Box<dyn PowerupEffect>) {
        self.effects.retain(|e| e.id() != effect.id());
        self.effects.push(effect);
    }

    pub fn get(&self, id: &str) -> Option<&dyn PowerupEffect> {
        self.effects
            .iter()
            .find(|e| e.id() == id)
            .map(|e| e.as_ref())
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.effects.iter().map(|e| e.id())
    }
}

impl Default for PowerupRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Consume one shield charge if any is armed.
///
/// On consumption the grace extension is requested from the timer port and
/// the emptied entry is removed from the map.
pub fn consume_shield(charges: &mut BTreeMap<String, u32>, timer: &mut dyn TimerPort) -> bool {
    let Some(remaining) = charges.get_mut(SHIELD_KEY) else {
        return false;
    };
    if *remaining == 0 {
        charges.remove(SHIELD_KEY);
        return false;
    }
    *remaining -= 1;
    if *remaining == 0 {
        charges.remove(SHIELD_KEY);
    }
    timer.extend_time(SHIELD_GRACE_SECS);
    true
}
