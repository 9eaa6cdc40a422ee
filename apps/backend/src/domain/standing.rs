use time::OffsetDateTime;

use super::scoring::ScoreAward;

/// Per-membership running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing {
    pub points: i32,
    pub win_streak: i32,
    pub last_match_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    Increment,
    Reset,
}

/// Change one match makes to one membership. Storage applies it as a single
/// relative update so concurrent reports never lose points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandingDelta {
    pub points: i32,
    pub streak: StreakChange,
    pub last_match_at: OffsetDateTime,
}

impl StandingDelta {
    pub fn for_winner(award: &ScoreAward, match_date: OffsetDateTime) -> Self {
        Self {
            points: award.winner_points,
            streak: StreakChange::Increment,
            last_match_at: match_date,
        }
    }

    pub fn for_loser(award: &ScoreAward, match_date: OffsetDateTime) -> Self {
        Self {
            points: award.loser_points,
            streak: StreakChange::Reset,
            last_match_at: match_date,
        }
    }
}

impl Standing {
    pub fn fresh() -> Self {
        Self {
            points: 0,
            win_streak: 0,
            last_match_at: None,
        }
    }

    pub fn apply(self, delta: &StandingDelta) -> Self {
        let win_streak = match delta.streak {
            StreakChange::Increment => self.win_streak + 1,
            StreakChange::Reset => 0,
        };
        Self {
            points: self.points + delta.points,
            win_streak,
            last_match_at: Some(delta.last_match_at),
        }
    }
}
