//! Match reporting transaction.
//!
//! [`report_match`] is the core: membership check, scoring, append, and the
//! two standing updates. It does not look at ladder state. HTTP callers go
//! through [`report_match_for_open_ladder`], which refuses missing, inactive,
//! or ended ladders first. Both must run inside one database transaction.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::domain::scoring::{policy_for, validate_sets, ScoringPolicy, SetScore};
use crate::domain::standing::StandingDelta;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, PreconditionKind};
use crate::repos::ladders as ladders_repo;
use crate::repos::matches::{self as matches_repo, MatchRecord, NewMatch};
use crate::repos::memberships::{self as memberships_repo, Membership};
use crate::services::membership::require_open_ladder;

/// A proposed match result.
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub ladder_id: i64,
    pub match_date: OffsetDateTime,
    pub winner_id: i64,
    pub loser_id: i64,
    pub sets: Vec<SetScore>,
}

/// Record a match using the ladder's scoring policy.
pub async fn report_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    report: MatchReport,
    now: OffsetDateTime,
) -> Result<MatchRecord, AppError> {
    validate_sets(&report.sets)?;
    let (winner, loser) = lock_players(conn, &report).await?;

    let ladder = ladders_repo::find_by_id(conn, report.ladder_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Ladder,
                format!("Ladder {} not found", report.ladder_id),
            )
        })?;
    let policy = policy_for(&ladder.algorithm)?;

    record(conn, policy, report, winner, loser, now).await
}

/// Boundary entry point: the ladder must exist, be active, and not have ended.
pub async fn report_match_for_open_ladder<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    report: MatchReport,
    now: OffsetDateTime,
) -> Result<MatchRecord, AppError> {
    let ladder = require_open_ladder(conn, report.ladder_id, now).await?;
    let policy = policy_for(&ladder.algorithm)?;

    validate_sets(&report.sets)?;
    let (winner, loser) = lock_players(conn, &report).await?;

    record(conn, policy, report, winner, loser, now).await
}

/// Load both memberships, locking rows in user-id order so two reports
/// between the same pair cannot deadlock.
async fn lock_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    report: &MatchReport,
) -> Result<(Membership, Membership), DomainError> {
    if report.winner_id == report.loser_id {
        warn!(
            ladder_id = report.ladder_id,
            user_id = report.winner_id,
            "match reported with the same player on both sides"
        );
    }

    let (first, second) = if report.winner_id <= report.loser_id {
        (report.winner_id, report.loser_id)
    } else {
        (report.loser_id, report.winner_id)
    };

    let first_row =
        memberships_repo::find_membership_for_update(conn, report.ladder_id, first).await?;
    let second_row = if second == first {
        first_row.clone()
    } else {
        memberships_repo::find_membership_for_update(conn, report.ladder_id, second).await?
    };

    let (winner, loser) = if report.winner_id == first {
        (first_row, second_row)
    } else {
        (second_row, first_row)
    };

    match (winner, loser) {
        (Some(w), Some(l)) => Ok((w, l)),
        (w, _) => {
            let missing = if w.is_none() {
                report.winner_id
            } else {
                report.loser_id
            };
            Err(DomainError::precondition(
                PreconditionKind::NotAMember,
                format!(
                    "Player {missing} is not a member of ladder {}",
                    report.ladder_id
                ),
            ))
        }
    }
}

async fn record<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    policy: &dyn ScoringPolicy,
    report: MatchReport,
    winner: Membership,
    loser: Membership,
    now: OffsetDateTime,
) -> Result<MatchRecord, AppError> {
    let award = policy.score(&report.sets, winner.standing.win_streak);
    let match_date = report.match_date;

    let record = matches_repo::append_match(
        conn,
        NewMatch {
            ladder_id: report.ladder_id,
            match_date,
            winner_id: report.winner_id,
            loser_id: report.loser_id,
            sets: report.sets,
        },
        award,
        now,
    )
    .await?;

    let winner_after = memberships_repo::apply_standing_delta(
        conn,
        winner.id,
        &StandingDelta::for_winner(&award, match_date),
    )
    .await?;
    // Relative update on the current row; a self-reported match stacks both deltas.
    let loser_after = memberships_repo::apply_standing_delta(
        conn,
        loser.id,
        &StandingDelta::for_loser(&award, match_date),
    )
    .await?;

    info!(
        ladder_id = record.ladder_id,
        match_id = record.id,
        winner_id = record.winner_id,
        loser_id = record.loser_id,
        winner_points = award.winner_points,
        loser_points = award.loser_points,
        straight_sets = award.straight_sets,
        win_streak_bonus = award.win_streak_bonus,
        bagels = award.bagel_sets_won_by_winner,
        winner_total = winner_after.standing.points,
        loser_total = loser_after.standing.points,
        algorithm = policy.algorithm(),
        "match_reported"
    );

    Ok(record)
}
