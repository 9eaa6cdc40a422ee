//! DTOs for matches_sea adapter.

use time::OffsetDateTime;

/// DTO for appending a match record.
#[derive(Debug, Clone)]
pub struct MatchCreate {
    pub ladder_id: i64,
    pub match_date: OffsetDateTime,
    pub winner_id: i64,
    pub loser_id: i64,
    pub winner_points: i32,
    pub loser_points: i32,
    pub straight_sets: bool,
    pub win_streak_bonus: bool,
    pub bagel_sets_won_by_winner: i32,
}

/// DTO for one set row of a match.
#[derive(Debug, Clone, Copy)]
pub struct SetCreate {
    pub set_number: i16,
    pub winner_games: i16,
    pub loser_games: i16,
    pub winner_tiebreak: Option<i16>,
    pub loser_tiebreak: Option<i16>,
}
