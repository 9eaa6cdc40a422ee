//! Ladder administration and read models.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;

use crate::domain::scoring::{policy_for, DEFAULT_ALGORITHM};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, PreconditionKind, ValidationKind};
use crate::repos::ladders::{self as ladders_repo, Ladder, NewLadder};
use crate::repos::{memberships as memberships_repo, users as users_repo};
use crate::services::membership::enroll;
use crate::services::users::require_user_by_id;

/// Input to [`create_ladder`].
#[derive(Debug, Clone)]
pub struct CreateLadder {
    pub name: String,
    pub password: Option<String>,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    pub created_by: i64,
    pub auto_add_creator: bool,
    pub algorithm: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatorSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Public view of a ladder. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LadderSummary {
    pub id: i64,
    pub name: String,
    pub has_password: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_date: OffsetDateTime,
    pub created_by: i64,
    pub is_active: bool,
    pub algorithm: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<CreatorSummary>,
}

impl From<Ladder> for LadderSummary {
    fn from(ladder: Ladder) -> Self {
        Self {
            id: ladder.id,
            has_password: ladder.has_password(),
            name: ladder.name,
            start_date: ladder.start_date,
            end_date: ladder.end_date,
            created_by: ladder.created_by,
            is_active: ladder.is_active,
            algorithm: ladder.algorithm,
            created_at: ladder.created_at,
            creator: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedLadder {
    #[serde(flatten)]
    pub ladder: LadderSummary,
    pub member_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinedLadder {
    #[serde(flatten)]
    pub ladder: LadderSummary,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

fn ladder_not_found(ladder_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Ladder, format!("Ladder {ladder_id} not found"))
}

async fn require_ladder<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
) -> Result<Ladder, DomainError> {
    ladders_repo::find_by_id(conn, ladder_id)
        .await?
        .ok_or_else(|| ladder_not_found(ladder_id))
}

fn require_creator(ladder: &Ladder, user_id: i64, action: &str) -> Result<(), DomainError> {
    if ladder.created_by != user_id {
        return Err(DomainError::precondition(
            PreconditionKind::NotLadderCreator,
            format!("Only the ladder creator can {action}"),
        ));
    }
    Ok(())
}

/// Create an active ladder. With `auto_add_creator`, the creator is enrolled
/// in the same transaction.
pub async fn create_ladder<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    req: CreateLadder,
    now: OffsetDateTime,
) -> Result<Ladder, AppError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(DomainError::validation_other("Ladder name is required").into());
    }
    if req.start_date >= req.end_date {
        return Err(DomainError::validation(
            ValidationKind::InvalidDateRange,
            "Start date must be before end date",
        )
        .into());
    }
    let algorithm = req
        .algorithm
        .unwrap_or_else(|| DEFAULT_ALGORITHM.to_string());
    policy_for(&algorithm)?;

    require_user_by_id(conn, req.created_by).await?;

    let password = req.password.filter(|p| !p.is_empty());
    let ladder = ladders_repo::create_ladder(
        conn,
        NewLadder {
            name,
            password,
            start_date: req.start_date,
            end_date: req.end_date,
            created_by: req.created_by,
            algorithm,
        },
        now,
    )
    .await?;

    if req.auto_add_creator {
        enroll(conn, ladder.id, req.created_by, now).await?;
    }

    info!(
        ladder_id = ladder.id,
        created_by = ladder.created_by,
        algorithm = %ladder.algorithm,
        auto_add_creator = req.auto_add_creator,
        "ladder_created"
    );
    Ok(ladder)
}

/// Creator-only toggle of `is_active`.
pub async fn set_ladder_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    is_active: bool,
    updated_by: i64,
) -> Result<Ladder, AppError> {
    let ladder = require_ladder(conn, ladder_id).await?;
    require_creator(&ladder, updated_by, "change ladder status")?;

    let updated = ladders_repo::set_active(conn, ladder_id, is_active).await?;
    if is_active {
        info!(ladder_id, updated_by, "ladder_activated");
    } else {
        info!(ladder_id, updated_by, "ladder_deactivated");
    }
    Ok(updated)
}

/// Creator-only removal of a member. Match history is left as is.
pub async fn remove_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_id: i64,
    removed_by: i64,
) -> Result<(), AppError> {
    let ladder = require_ladder(conn, ladder_id).await?;
    require_creator(&ladder, removed_by, "remove members")?;

    let membership = memberships_repo::find_membership(conn, ladder_id, user_id)
        .await?
        .ok_or_else(|| {
            DomainError::precondition(
                PreconditionKind::NotAMember,
                format!("User {user_id} is not a member of this ladder"),
            )
        })?;
    memberships_repo::delete_membership(conn, membership.id).await?;

    info!(ladder_id, user_id, removed_by, "ladder_member_removed");
    Ok(())
}

pub async fn get_ladder<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
) -> Result<LadderSummary, AppError> {
    let ladder = require_ladder(conn, ladder_id).await?;
    let mut summary = LadderSummary::from(ladder);
    summary.creator = users_repo::find_user_by_id(conn, summary.created_by)
        .await?
        .map(|u| CreatorSummary {
            id: u.id,
            name: u.name,
            email: u.email,
        });
    Ok(summary)
}

/// Every ladder, newest first, with an inline creator summary.
pub async fn list_ladders<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<LadderSummary>, AppError> {
    let ladders = ladders_repo::list_all(conn).await?;

    let mut creator_ids: Vec<i64> = ladders.iter().map(|l| l.created_by).collect();
    creator_ids.sort_unstable();
    creator_ids.dedup();
    let creators: HashMap<i64, CreatorSummary> = users_repo::find_users_by_ids(conn, creator_ids)
        .await?
        .into_iter()
        .map(|u| {
            (
                u.id,
                CreatorSummary {
                    id: u.id,
                    name: u.name,
                    email: u.email,
                },
            )
        })
        .collect();

    Ok(ladders
        .into_iter()
        .map(|ladder| {
            let creator = creators.get(&ladder.created_by).cloned();
            LadderSummary {
                creator,
                ..LadderSummary::from(ladder)
            }
        })
        .collect())
}

/// Ladders created by `user_id`, with member counts.
pub async fn list_ladders_by_creator<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<CreatedLadder>, AppError> {
    let ladders = ladders_repo::list_by_creator(conn, user_id).await?;
    let mut out = Vec::with_capacity(ladders.len());
    for ladder in ladders {
        let member_count = memberships_repo::count_by_ladder(conn, ladder.id).await?;
        out.push(CreatedLadder {
            ladder: LadderSummary::from(ladder),
            member_count,
        });
    }
    Ok(out)
}

/// Ladders `user_id` belongs to, most recently joined first.
pub async fn list_user_ladders<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<JoinedLadder>, AppError> {
    let memberships = memberships_repo::list_by_user(conn, user_id).await?;
    let mut ladders: HashMap<i64, Ladder> =
        ladders_repo::list_by_ids(conn, memberships.iter().map(|m| m.ladder_id).collect())
            .await?
            .into_iter()
            .map(|l| (l.id, l))
            .collect();

    memberships
        .into_iter()
        .map(|m| {
            let ladder = ladders
                .remove(&m.ladder_id)
                .ok_or_else(|| ladder_not_found(m.ladder_id))?;
            Ok::<_, AppError>(JoinedLadder {
                ladder: LadderSummary::from(ladder),
                joined_at: m.joined_at,
            })
        })
        .collect()
}

/// Whether `user_id` holds a membership. An absent user is never a member.
pub async fn is_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_id: Option<i64>,
) -> Result<bool, AppError> {
    let Some(user_id) = user_id else {
        return Ok(false);
    };
    Ok(memberships_repo::find_membership(conn, ladder_id, user_id)
        .await?
        .is_some())
}
