//! Game configuration: ranks, powerups, achievements, difficulties
//!
//! The config is supplied by the host and immutable for the lifetime of a
//! session. It is validated eagerly when a session is constructed: a rank
//! table without a zero-threshold entry would make rank lookup partial, so it
//! is rejected up front rather than at results time.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A named tier unlocked by reaching a minimum cumulative score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    pub name: String,
    pub min_score: u32,
    pub icon: String,
}

/// A consumable effect the player can apply during play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Powerup {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub color: String,
    pub rewards: String,
    /// Applied to `BASE_POINTS` per correct answer.
    #[serde(default = "default_multiplier")]
    pub points_multiplier: u32,
}

fn default_multiplier() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub ranks: Vec<Rank>,
    pub powerups: Vec<Powerup>,
    pub achievements: Vec<Achievement>,
    pub difficulties: Vec<Difficulty>,
}

impl GameConfig {
    /// Check startup invariants. Rank lookup must be total for any score,
    /// which requires at least one rank reachable at score 0.
    pub fn validate(&self) -> Result<(), GameError> {
        if !self.ranks.iter().any(|r| r.min_score == 0) {
            return Err(GameError::NoQualifyingRank);
        }
        Ok(())
    }

    pub fn difficulty(&self, id: &str) -> Option<&Difficulty> {
        self.difficulties.iter().find(|d| d.id == id)
    }

    /// Points multiplier for a difficulty id; 1 for unknown ids.
    pub fn multiplier_for(&self, id: &str) -> u32 {
        self.difficulty(id).map_or(1, |d| d.points_multiplier.max(1))
    }

    /// Built-in cosmic-themed catalog.
    pub fn cosmic() -> Self {
        Self {
            ranks: vec![
                Rank {
                    name: "Cosmic Novice".into(),
                    min_score: 0,
                    icon: "🌑".into(),
                },
                Rank {
                    name: "Star Cadet".into(),
                    min_score: 500,
                    icon: "⭐".into(),
                },
                Rank {
                    name: "Nova Voyager".into(),
                    min_score: 1000,
                    icon: "🌟".into(),
                },
                Rank {
                    name: "Galactic Legend".into(),
                    min_score: 2000,
                    icon: "🌌".into(),
                },
            ],
            powerups: vec![
                Powerup {
                    id: "time-dilation".into(),
                    name: "Time Dilation".into(),
                    description: "Slow down time and gain 15 extra seconds".into(),
                    icon: "⏳".into(),
                    cost: 200,
                },
                Powerup {
                    id: "quantum-hint".into(),
                    name: "Quantum Hint".into(),
                    description: "Collapse two wrong answers out of existence".into(),
                    icon: "🔮".into(),
                    cost: 300,
                },
                Powerup {
                    id: "cosmic-shield".into(),
                    name: "Cosmic Shield".into(),
                    description: "Survive one timeout with a grace period".into(),
                    icon: "🛡️".into(),
                    cost: 400,
                },
            ],
            achievements: vec![
                Achievement {
                    id: "first-light".into(),
                    name: "First Light".into(),
                    description: "Finish your first quiz run".into(),
                    icon: "🌅".into(),
                },
                Achievement {
                    id: "streak-5".into(),
                    name: "Plasma Streak".into(),
                    description: "Answer 5 questions correctly in a row".into(),
                    icon: "🔥".into(),
                },
                Achievement {
                    id: "perfect-run".into(),
                    name: "Event Horizon".into(),
                    description: "Finish a run with every answer correct".into(),
                    icon: "🕳️".into(),
                },
            ],
            difficulties: vec![
                Difficulty {
                    id: "orbit".into(),
                    name: "Orbit".into(),
                    icon: "🛰️".into(),
                    description: "A gentle pass through the basics".into(),
                    color: "#4fc3f7".into(),
                    rewards: "Standard points".into(),
                    points_multiplier: 1,
                },
                Difficulty {
                    id: "nebula".into(),
                    name: "Nebula".into(),
                    icon: "☁️".into(),
                    description: "Denser questions, double points".into(),
                    color: "#ba68c8".into(),
                    rewards: "2x points".into(),
                    points_multiplier: 2,
                },
                Difficulty {
                    id: "supernova".into(),
                    name: "Supernova".into(),
                    icon: "💥".into(),
                    description: "Only for seasoned stargazers".into(),
                    color: "#ff8a65".into(),
                    rewards: "3x points".into(),
                    points_multiplier: 3,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosmic_config_is_valid() {
        assert!(GameConfig::cosmic().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_zero_rank() {
        let mut config = GameConfig::cosmic();
        config.ranks.retain(|r| r.min_score > 0);
        assert_eq!(config.validate(), Err(GameError::NoQualifyingRank));
    }

    #[test]
    fn test_multiplier_for_unknown_difficulty_is_one() {
        let config = GameConfig::cosmic();
        assert_eq!(config.multiplier_for("nebula"), 2);
        assert_eq!(config.multiplier_for("void"), 1);
    }

    #[test]
    fn test_difficulty_multiplier_defaults_when_absent() {
        let json = r##"{
            "id": "orbit",
            "name": "Orbit",
            "icon": "o",
            "description": "d",
            "color": "#fff",
            "rewards": "r"
        }"##;
        let difficulty: Difficulty = serde_json::from_str(json).unwrap();
        assert_eq!(difficulty.points_multiplier, 1);
    }
}
