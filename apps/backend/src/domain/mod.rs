//! Domain layer: pure ladder logic with no I/O.

pub mod ranking;
pub mod scoring;
pub mod standing;
pub mod stats;

#[cfg(test)]
mod tests_props_scoring;

pub use ranking::{position_of, rank_standings, tally_results, RankedStanding, ResultTally};
pub use scoring::{
    policy_for, validate_sets, PointsV1, ScoreAward, ScoringPolicy, SetScore, DEFAULT_ALGORITHM,
};
pub use standing::{Standing, StandingDelta, StreakChange};
pub use stats::{head_to_head, player_stats, HeadToHeadRecord, MatchView, PlayerStats};
