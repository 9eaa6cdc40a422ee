//! Membership repository functions for domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::memberships_sea as memberships_adapter;
use crate::domain::standing::{Standing, StandingDelta, StreakChange};
use crate::entities::ladder_members;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Ladder membership domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: i64,
    pub ladder_id: i64,
    pub user_id: i64,
    pub joined_at: OffsetDateTime,
    pub standing: Standing,
}

impl From<ladder_members::Model> for Membership {
    fn from(model: ladder_members::Model) -> Self {
        Self {
            id: model.id,
            ladder_id: model.ladder_id,
            user_id: model.user_id,
            joined_at: model.joined_at,
            standing: Standing {
                points: model.points,
                win_streak: model.win_streak,
                last_match_at: model.last_match_at,
            },
        }
    }
}

pub async fn find_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_id: i64,
) -> Result<Option<Membership>, DomainError> {
    let membership = memberships_adapter::find_membership(conn, ladder_id, user_id).await?;
    Ok(membership.map(Membership::from))
}

/// Row-locking read (Postgres) used before a standing update.
pub async fn find_membership_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_id: i64,
) -> Result<Option<Membership>, DomainError> {
    let membership =
        memberships_adapter::find_membership_for_update(conn, ladder_id, user_id).await?;
    Ok(membership.map(Membership::from))
}

pub async fn create_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_id: i64,
    joined_at: OffsetDateTime,
) -> Result<Membership, DomainError> {
    let membership =
        memberships_adapter::create_membership(conn, ladder_id, user_id, joined_at).await?;
    Ok(Membership::from(membership))
}

pub async fn delete_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    membership_id: i64,
) -> Result<(), DomainError> {
    memberships_adapter::delete_membership(conn, membership_id).await?;
    Ok(())
}

/// Members of a ladder in join order.
pub async fn list_by_ladder<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
) -> Result<Vec<Membership>, DomainError> {
    let rows = memberships_adapter::find_all_by_ladder(conn, ladder_id).await?;
    Ok(rows.into_iter().map(Membership::from).collect())
}

/// A user's memberships, most recently joined first.
pub async fn list_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Membership>, DomainError> {
    let rows = memberships_adapter::find_all_by_user(conn, user_id).await?;
    Ok(rows.into_iter().map(Membership::from).collect())
}

pub async fn count_by_ladder<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
) -> Result<u64, DomainError> {
    Ok(memberships_adapter::count_by_ladder(conn, ladder_id).await?)
}

/// Apply `delta` to a membership in one statement and return the fresh row.
pub async fn apply_standing_delta<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    membership_id: i64,
    delta: &StandingDelta,
) -> Result<Membership, DomainError> {
    let patch = memberships_adapter::StandingPatch {
        membership_id,
        points_delta: delta.points,
        streak: match delta.streak {
            StreakChange::Increment => memberships_adapter::StreakUpdate::Increment,
            StreakChange::Reset => memberships_adapter::StreakUpdate::Reset,
        },
        last_match_at: delta.last_match_at,
    };
    memberships_adapter::apply_standing_patch(conn, patch).await?;

    memberships_adapter::find_by_id(conn, membership_id)
        .await?
        .map(Membership::from)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Other("Membership".into()),
                format!("Membership {membership_id} vanished during update"),
            )
        })
}
