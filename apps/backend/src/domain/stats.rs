//! Per-player match statistics and head-to-head records.

use serde::Serialize;
use time::OffsetDateTime;

use super::scoring::SetScore;

/// A persisted match with its sets, as the statistics see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchView {
    pub id: i64,
    pub match_date: OffsetDateTime,
    pub winner_id: i64,
    pub loser_id: i64,
    pub sets: Vec<SetScore>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub games_won: u32,
    pub games_lost: u32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_match_date: Option<OffsetDateTime>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeadToHeadRecord {
    pub a_wins: u32,
    pub b_wins: u32,
    pub total: u32,
}

fn games(n: i16) -> u32 {
    u32::try_from(n).unwrap_or(0)
}

/// Fold `user_id`'s matches into totals from that player's perspective.
/// Tiebreak points count toward games.
pub fn player_stats<'a, I>(user_id: i64, matches: I) -> PlayerStats
where
    I: IntoIterator<Item = &'a MatchView>,
{
    let mut stats = PlayerStats::default();

    for m in matches {
        stats.matches += 1;
        let won = m.winner_id == user_id;
        if won {
            stats.wins += 1;
        } else {
            stats.losses += 1;
        }

        for s in &m.sets {
            let (mine, theirs, my_tb, their_tb) = if won {
                (s.winner_games, s.loser_games, s.winner_tiebreak, s.loser_tiebreak)
            } else {
                (s.loser_games, s.winner_games, s.loser_tiebreak, s.winner_tiebreak)
            };
            if mine > theirs {
                stats.sets_won += 1;
            } else if theirs > mine {
                stats.sets_lost += 1;
            }
            stats.games_won += games(mine) + my_tb.map_or(0, games);
            stats.games_lost += games(theirs) + their_tb.map_or(0, games);
        }

        stats.last_match_date = match stats.last_match_date {
            Some(last) if last >= m.match_date => Some(last),
            _ => Some(m.match_date),
        };
    }

    stats
}

/// Win record between `user_a` and `user_b` over the given matches.
pub fn head_to_head<'a, I>(user_a: i64, user_b: i64, matches: I) -> HeadToHeadRecord
where
    I: IntoIterator<Item = &'a MatchView>,
{
    let mut record = HeadToHeadRecord::default();
    for m in matches {
        record.total += 1;
        if m.winner_id == user_a {
            record.a_wins += 1;
        } else if m.winner_id == user_b {
            record.b_wins += 1;
        }
    }
    record
}
