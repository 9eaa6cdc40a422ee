//! Read-side match history: per-player lists, stats, and head-to-head.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::domain::stats::{
    head_to_head as tally_head_to_head, player_stats, HeadToHeadRecord, PlayerStats,
};
use crate::error::AppError;
use crate::repos::matches::{self as matches_repo, MatchRecord};

#[derive(Debug, Clone, Serialize)]
pub struct HeadToHead {
    pub record: HeadToHeadRecord,
    pub matches: Vec<MatchRecord>,
}

/// A player's matches in a ladder, newest first, capped at `limit` when it is
/// non-zero.
pub async fn list_user_matches<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_id: i64,
    limit: Option<usize>,
) -> Result<Vec<MatchRecord>, AppError> {
    let mut matches = matches_repo::list_for_player(conn, ladder_id, user_id).await?;
    // A zero limit means no cap
    if let Some(limit) = limit.filter(|l| *l > 0) {
        matches.truncate(limit);
    }
    Ok(matches)
}

pub async fn user_ladder_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_id: i64,
) -> Result<PlayerStats, AppError> {
    let matches = matches_repo::list_for_player(conn, ladder_id, user_id).await?;
    let views: Vec<_> = matches.iter().map(MatchRecord::view).collect();
    Ok(player_stats(user_id, &views))
}

pub async fn head_to_head<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_a: i64,
    user_b: i64,
) -> Result<HeadToHead, AppError> {
    let matches = matches_repo::list_between(conn, ladder_id, user_a, user_b).await?;
    let views: Vec<_> = matches.iter().map(MatchRecord::view).collect();
    Ok(HeadToHead {
        record: tally_head_to_head(user_a, user_b, &views),
        matches,
    })
}
