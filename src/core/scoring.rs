//! Scoring module - score/streak arithmetic and rank derivation
//!
//! All functions here are pure; the session applies their results atomically
//! with its sub-state transition so no partial update is ever observable.

use crate::config::Rank;
use crate::error::GameError;
use crate::types::BASE_POINTS;

/// Score calculation result for one submitted answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreUpdate {
    pub correct: bool,
    /// Points added by this answer (0 on a miss).
    pub awarded: u32,
    pub score: u32,
    pub streak: u32,
    pub best_streak: u32,
}

/// Points for one correct answer at the given difficulty multiplier.
pub fn answer_points(multiplier: u32) -> u32 {
    BASE_POINTS.saturating_mul(multiplier.max(1))
}

/// Fold one answer into the running score/streak values.
///
/// Correct: score grows by `answer_points`, streak extends, best streak is
/// raised if beaten. Incorrect: streak resets to 0 and score is untouched.
pub fn score_answer(
    correct: bool,
    multiplier: u32,
    score: u32,
    streak: u32,
    best_streak: u32,
) -> ScoreUpdate {
    if correct {
        let awarded = answer_points(multiplier);
        let streak = streak.saturating_add(1);
        ScoreUpdate {
            correct,
            awarded,
            score: score.saturating_add(awarded),
            streak,
            best_streak: best_streak.max(streak),
        }
    } else {
        ScoreUpdate {
            correct,
            awarded: 0,
            score,
            streak: 0,
            best_streak,
        }
    }
}

/// Find the rank with the highest threshold not exceeding `score`.
///
/// Thresholds are compared in ascending order regardless of how the config
/// lists them. With no qualifying rank (possible only when the config lacks a
/// zero-threshold rank) this is a configuration defect.
pub fn calculate_rank(ranks: &[Rank], score: u32) -> Result<&Rank, GameError> {
    ranks
        .iter()
        .filter(|r| r.min_score <= score)
        .max_by_key(|r| r.min_score)
        .ok_or(GameError::NoQualifyingRank)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks() -> Vec<Rank> {
        [("Novice", 0), ("Star", 500), ("Nova", 1000)]
            .into_iter()
            .map(|(name, min_score)| Rank {
                name: name.into(),
                min_score,
                icon: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_correct_answer_updates_all_counters() {
        let update = score_answer(true, 1, 300, 3, 3);
        assert_eq!(update.awarded, 100);
        assert_eq!(update.score, 400);
        assert_eq!(update.streak, 4);
        assert_eq!(update.best_streak, 4);
    }

    #[test]
    fn test_incorrect_answer_resets_streak_only() {
        let update = score_answer(false, 3, 600, 6, 6);
        assert_eq!(update.awarded, 0);
        assert_eq!(update.score, 600);
        assert_eq!(update.streak, 0);
        assert_eq!(update.best_streak, 6);
    }

    #[test]
    fn test_best_streak_not_lowered_by_shorter_streak() {
        let update = score_answer(true, 1, 0, 1, 9);
        assert_eq!(update.streak, 2);
        assert_eq!(update.best_streak, 9);
    }

    #[test]
    fn test_answer_points_scales_with_multiplier() {
        assert_eq!(answer_points(1), 100);
        assert_eq!(answer_points(3), 300);
        // Zero multiplier is treated as unscaled, not as a void award.
        assert_eq!(answer_points(0), 100);
    }

    #[test]
    fn test_score_saturates_instead_of_wrapping() {
        let update = score_answer(true, u32::MAX, u32::MAX - 1, 0, 0);
        assert_eq!(update.score, u32::MAX);
    }

    #[test]
    fn test_rank_picks_highest_threshold_at_or_below_score() {
        let ranks = ranks();
        assert_eq!(calculate_rank(&ranks, 0).unwrap().name, "Novice");
        assert_eq!(calculate_rank(&ranks, 499).unwrap().name, "Novice");
        assert_eq!(calculate_rank(&ranks, 500).unwrap().name, "Star");
        assert_eq!(calculate_rank(&ranks, 600).unwrap().name, "Star");
        assert_eq!(calculate_rank(&ranks, 1000).unwrap().name, "Nova");
        assert_eq!(calculate_rank(&ranks, u32::MAX).unwrap().name, "Nova");
    }

    #[test]
    fn test_rank_order_in_config_does_not_matter() {
        let mut ranks = ranks();
        ranks.reverse();
        assert_eq!(calculate_rank(&ranks, 600).unwrap().name, "Star");
    }

    #[test]
    fn test_rank_is_idempotent() {
        let ranks = ranks();
        let first = calculate_rank(&ranks, 750).unwrap().name.clone();
        let second = calculate_rank(&ranks, 750).unwrap().name.clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rank_without_zero_threshold_is_a_config_defect() {
        let ranks = vec![Rank {
            name: "Star".into(),
            min_score: 500,
            icon: String::new(),
        }];
        assert_eq!(calculate_rank(&ranks, 100), Err(GameError::NoQualifyingRank));
        assert_eq!(calculate_rank(&[], 100), Err(GameError::NoQualifyingRank));
    }
}
