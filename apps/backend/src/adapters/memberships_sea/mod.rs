//! SeaORM adapter for ladder memberships.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::ladder_members;

pub mod dto;

pub use dto::{StandingPatch, StreakUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_id: i64,
) -> Result<Option<ladder_members::Model>, sea_orm::DbErr> {
    ladder_members::Entity::find()
        .filter(ladder_members::Column::LadderId.eq(ladder_id))
        .filter(ladder_members::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

/// Like [`find_membership`], but on Postgres the row stays locked until the
/// surrounding transaction ends.
pub async fn find_membership_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_id: i64,
) -> Result<Option<ladder_members::Model>, sea_orm::DbErr> {
    let query = ladder_members::Entity::find()
        .filter(ladder_members::Column::LadderId.eq(ladder_id))
        .filter(ladder_members::Column::UserId.eq(user_id));
    match conn.get_database_backend() {
        DbBackend::Postgres => query.lock_exclusive().one(conn).await,
        _ => query.one(conn).await,
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<ladder_members::Model>, sea_orm::DbErr> {
    ladder_members::Entity::find_by_id(id).one(conn).await
}

pub async fn create_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    user_id: i64,
    joined_at: OffsetDateTime,
) -> Result<ladder_members::Model, sea_orm::DbErr> {
    let active = ladder_members::ActiveModel {
        id: NotSet,
        ladder_id: Set(ladder_id),
        user_id: Set(user_id),
        joined_at: Set(joined_at),
        points: Set(0),
        win_streak: Set(0),
        last_match_at: Set(None),
    };
    active.insert(conn).await
}

pub async fn delete_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), sea_orm::DbErr> {
    ladder_members::Entity::delete_by_id(id).exec(conn).await?;
    Ok(())
}

/// Members of a ladder in join order.
pub async fn find_all_by_ladder<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
) -> Result<Vec<ladder_members::Model>, sea_orm::DbErr> {
    ladder_members::Entity::find()
        .filter(ladder_members::Column::LadderId.eq(ladder_id))
        .order_by_asc(ladder_members::Column::Id)
        .all(conn)
        .await
}

pub async fn find_all_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<ladder_members::Model>, sea_orm::DbErr> {
    ladder_members::Entity::find()
        .filter(ladder_members::Column::UserId.eq(user_id))
        .order_by_desc(ladder_members::Column::JoinedAt)
        .all(conn)
        .await
}

pub async fn count_by_ladder<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    ladder_members::Entity::find()
        .filter(ladder_members::Column::LadderId.eq(ladder_id))
        .count(conn)
        .await
}

/// Apply a standing change as one relative UPDATE.
pub async fn apply_standing_patch<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    patch: StandingPatch,
) -> Result<u64, sea_orm::DbErr> {
    let streak = match patch.streak {
        StreakUpdate::Increment => Expr::col(ladder_members::Column::WinStreak).add(1),
        StreakUpdate::Reset => Expr::value(0),
    };

    let result = ladder_members::Entity::update_many()
        .col_expr(
            ladder_members::Column::Points,
            Expr::col(ladder_members::Column::Points).add(patch.points_delta),
        )
        .col_expr(ladder_members::Column::WinStreak, streak)
        .col_expr(
            ladder_members::Column::LastMatchAt,
            Expr::value(Some(patch.last_match_at)),
        )
        .filter(ladder_members::Column::Id.eq(patch.membership_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
