//! Scoring policies: turn a reported match into a point award.
//!
//! A ladder names its policy through its `algorithm` tag; [`policy_for`]
//! resolves the tag. Policies are pure and see only the reported sets and
//! the winner's streak before the match.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Tag of the policy new ladders get when none is requested.
pub const DEFAULT_ALGORITHM: &str = "points_v1";

/// One set's score, always from the match winner's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub set_number: i16,
    pub winner_games: i16,
    pub loser_games: i16,
    #[serde(default)]
    pub winner_tiebreak: Option<i16>,
    #[serde(default)]
    pub loser_tiebreak: Option<i16>,
}

impl SetScore {
    pub fn new(set_number: i16, winner_games: i16, loser_games: i16) -> Self {
        Self {
            set_number,
            winner_games,
            loser_games,
            winner_tiebreak: None,
            loser_tiebreak: None,
        }
    }

    pub fn with_tiebreak(mut self, winner: i16, loser: i16) -> Self {
        self.winner_tiebreak = Some(winner);
        self.loser_tiebreak = Some(loser);
        self
    }

    /// Won 6-0 by the match winner.
    pub fn is_bagel(&self) -> bool {
        self.winner_games == 6 && self.loser_games == 0
    }
}

/// Points and bonus flags persisted on the match record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreAward {
    pub winner_points: i32,
    pub loser_points: i32,
    pub straight_sets: bool,
    pub win_streak_bonus: bool,
    pub bagel_sets_won_by_winner: i32,
}

pub trait ScoringPolicy: Send + Sync {
    /// Tag stored on ladders that use this policy.
    fn algorithm(&self) -> &'static str;

    /// Award for a match given the winner's streak before it is applied.
    fn score(&self, sets: &[SetScore], winner_streak_before: i32) -> ScoreAward;
}

/// The original ladder policy: fixed base awards plus three additive
/// winner bonuses.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointsV1;

impl PointsV1 {
    pub const WINNER_BASE: i32 = 50;
    pub const LOSER_BASE: i32 = 12;
    pub const STRAIGHT_SETS_BONUS: i32 = 5;
    pub const WIN_STREAK_BONUS: i32 = 3;
    pub const BAGEL_BONUS: i32 = 3;
    /// Pre-match streak at which the next win earns the streak bonus.
    pub const STREAK_TRIGGER: i32 = 2;
}

impl ScoringPolicy for PointsV1 {
    fn algorithm(&self) -> &'static str {
        DEFAULT_ALGORITHM
    }

    fn score(&self, sets: &[SetScore], winner_streak_before: i32) -> ScoreAward {
        let mut winner_points = Self::WINNER_BASE;

        // Only a two-set report can count as straight sets.
        let straight_sets =
            sets.len() == 2 && sets.iter().all(|s| s.winner_games > s.loser_games);
        if straight_sets {
            winner_points += Self::STRAIGHT_SETS_BONUS;
        }

        let win_streak_bonus = winner_streak_before == Self::STREAK_TRIGGER;
        if win_streak_bonus {
            winner_points += Self::WIN_STREAK_BONUS;
        }

        let bagels = sets.iter().filter(|s| s.is_bagel()).count() as i32;
        winner_points += bagels * Self::BAGEL_BONUS;

        ScoreAward {
            winner_points,
            loser_points: Self::LOSER_BASE,
            straight_sets,
            win_streak_bonus,
            bagel_sets_won_by_winner: bagels,
        }
    }
}

static POINTS_V1: PointsV1 = PointsV1;

/// Resolve a ladder's algorithm tag.
pub fn policy_for(algorithm: &str) -> Result<&'static dyn ScoringPolicy, DomainError> {
    match algorithm {
        DEFAULT_ALGORITHM => Ok(&POINTS_V1),
        other => Err(DomainError::validation(
            ValidationKind::UnknownAlgorithm,
            format!("Unknown scoring algorithm '{other}'"),
        )),
    }
}

/// Structural checks on a reported set list. Set legality (6-4 vs 6-5 and
/// so on) is left to the caller.
pub fn validate_sets(sets: &[SetScore]) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(sets.len());
    for set in sets {
        if set.set_number < 1 {
            return Err(DomainError::validation(
                ValidationKind::InvalidSets,
                format!("Set number must be at least 1, got {}", set.set_number),
            ));
        }
        if !seen.insert(set.set_number) {
            return Err(DomainError::validation(
                ValidationKind::InvalidSets,
                format!("Set number {} reported twice", set.set_number),
            ));
        }
        let negative = set.winner_games < 0
            || set.loser_games < 0
            || set.winner_tiebreak.is_some_and(|t| t < 0)
            || set.loser_tiebreak.is_some_and(|t| t < 0);
        if negative {
            return Err(DomainError::validation(
                ValidationKind::InvalidSets,
                format!("Set {} has a negative score", set.set_number),
            ));
        }
    }
    Ok(())
}
