//! Membership gate: validates and records ladder join requests.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;

use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, PreconditionKind};
use crate::repos::ladders::{self as ladders_repo, Ladder};
use crate::repos::memberships::{self as memberships_repo, Membership};
use crate::services::users::require_user;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinOutcome {
    pub success: bool,
    pub message: String,
    pub membership_id: i64,
}

/// Ladder that exists and can still accept joins and reports.
pub(crate) async fn require_open_ladder<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    now: OffsetDateTime,
) -> Result<Ladder, DomainError> {
    let ladder = ladders_repo::find_by_id_for_update(conn, ladder_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Ladder, format!("Ladder {ladder_id} not found"))
        })?;

    if !ladder.is_active {
        return Err(DomainError::precondition(
            PreconditionKind::LadderInactive,
            "This ladder is no longer active",
        ));
    }
    if ladder.is_ended(now) {
        return Err(DomainError::precondition(
            PreconditionKind::LadderEnded,
            "This ladder has ended",
        ));
    }
    Ok(ladder)
}

/// Join `ladder_id` as the user behind `requester_email`.
///
/// Checks run in a fixed order and the first failure wins: identity, user,
/// ladder exists, active, not ended, password, not already a member.
pub async fn join_ladder<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    requester_email: Option<&str>,
    password: Option<&str>,
    now: OffsetDateTime,
) -> Result<JoinOutcome, AppError> {
    let user = require_user(conn, requester_email).await?;
    let ladder = require_open_ladder(conn, ladder_id, now).await?;

    if let Some(expected) = ladder.password.as_deref() {
        if password != Some(expected) {
            return Err(DomainError::precondition(
                PreconditionKind::InvalidPassword,
                "Incorrect ladder password",
            )
            .into());
        }
    }

    if memberships_repo::find_membership(conn, ladder.id, user.id)
        .await?
        .is_some()
    {
        return Err(already_member().into());
    }

    // The unique (ladder_id, user_id) index catches a concurrent join that
    // slipped past the check above; db_errors maps it to AlreadyMember.
    let membership = memberships_repo::create_membership(conn, ladder.id, user.id, now).await?;

    info!(
        ladder_id = ladder.id,
        user_id = user.id,
        membership_id = membership.id,
        "ladder_joined"
    );

    Ok(JoinOutcome {
        success: true,
        message: format!("Joined {}", ladder.name),
        membership_id: membership.id,
    })
}

/// Enroll without the gate; used for creators joining their own new ladder.
pub(crate) async fn enroll<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_id: i64,
    now: OffsetDateTime,
) -> Result<Membership, DomainError> {
    memberships_repo::create_membership(conn, ladder_id, user_id, now).await
}

fn already_member() -> DomainError {
    DomainError::conflict(ConflictKind::AlreadyMember, "Already a member of this ladder")
}
