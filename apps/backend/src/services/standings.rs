//! Ranking projection over a ladder's memberships.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::ranking::{position_of, rank_standings, tally_results, RankedStanding};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::memberships::Membership;
use crate::repos::{ladders as ladders_repo, matches as matches_repo};
use crate::repos::{memberships as memberships_repo, users as users_repo};

/// One standings row as shown to players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingEntry {
    pub position: usize,
    pub user_id: i64,
    pub name: String,
    pub points: i32,
    pub win_streak: i32,
    pub wins: u32,
    pub losses: u32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_match_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

async fn ranked_memberships<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
) -> Result<(Vec<RankedStanding>, Vec<Membership>), DomainError> {
    let members = memberships_repo::list_by_ladder(conn, ladder_id).await?;
    let tally = tally_results(matches_repo::list_results(conn, ladder_id).await?);

    let rows = members
        .iter()
        .map(|m| {
            let t = tally.get(&m.user_id).copied().unwrap_or_default();
            RankedStanding {
                position: 0,
                membership_id: m.id,
                user_id: m.user_id,
                points: m.standing.points,
                win_streak: m.standing.win_streak,
                wins: t.wins,
                losses: t.losses,
            }
        })
        .collect();
    Ok((rank_standings(rows), members))
}

/// Ordered standings for a ladder.
pub async fn get_standings<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
) -> Result<Vec<StandingEntry>, AppError> {
    if ladders_repo::find_by_id(conn, ladder_id).await?.is_none() {
        return Err(DomainError::not_found(
            NotFoundKind::Ladder,
            format!("Ladder {ladder_id} not found"),
        )
        .into());
    }

    let (ranked, members) = ranked_memberships(conn, ladder_id).await?;
    let by_membership: HashMap<i64, Membership> =
        members.into_iter().map(|m| (m.id, m)).collect();
    let names: HashMap<i64, String> =
        users_repo::find_users_by_ids(conn, ranked.iter().map(|r| r.user_id).collect())
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

    let entries = ranked
        .into_iter()
        .filter_map(|r| {
            let m = by_membership.get(&r.membership_id)?;
            Some(StandingEntry {
                position: r.position,
                user_id: r.user_id,
                name: names.get(&r.user_id).cloned().unwrap_or_default(),
                points: r.points,
                win_streak: r.win_streak,
                wins: r.wins,
                losses: r.losses,
                last_match_at: m.standing.last_match_at,
                joined_at: m.joined_at,
            })
        })
        .collect();
    Ok(entries)
}

/// 1-based rank of `user_id` in the ladder, 0 when they are not a member.
pub async fn get_player_position<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_id: i64,
) -> Result<usize, AppError> {
    let (ranked, _) = ranked_memberships(conn, ladder_id).await?;
    Ok(position_of(&ranked, user_id))
}
