//! Standings order for a ladder.
//!
//! Points first, then wins, both descending. Remaining ties fall back to
//! join order (membership id) so the projection is stable across calls.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

/// Wins and losses for one player within one ladder.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResultTally {
    pub wins: u32,
    pub losses: u32,
}

/// One row of a ladder's standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedStanding {
    pub position: usize,
    pub membership_id: i64,
    pub user_id: i64,
    pub points: i32,
    pub win_streak: i32,
    pub wins: u32,
    pub losses: u32,
}

/// Count wins and losses per player from `(winner_id, loser_id)` pairs.
pub fn tally_results<I>(results: I) -> HashMap<i64, ResultTally>
where
    I: IntoIterator<Item = (i64, i64)>,
{
    let mut tally: HashMap<i64, ResultTally> = HashMap::new();
    for (winner, loser) in results {
        tally.entry(winner).or_default().wins += 1;
        tally.entry(loser).or_default().losses += 1;
    }
    tally
}

fn standings_order(a: &RankedStanding, b: &RankedStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| a.membership_id.cmp(&b.membership_id))
}

/// Sort rows into standings order and assign 1-based positions.
pub fn rank_standings(mut rows: Vec<RankedStanding>) -> Vec<RankedStanding> {
    rows.sort_by(standings_order);
    for (idx, row) in rows.iter_mut().enumerate() {
        row.position = idx + 1;
    }
    rows
}

/// 1-based position of `user_id` in ranked rows, or 0 when not present.
pub fn position_of(ranked: &[RankedStanding], user_id: i64) -> usize {
    ranked
        .iter()
        .find(|row| row.user_id == user_id)
        .map_or(0, |row| row.position)
}
