//! SeaORM adapter for ladders.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::ladders;

pub mod dto;

pub use dto::LadderCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<ladders::Model>, sea_orm::DbErr> {
    ladders::Entity::find_by_id(id).one(conn).await
}

/// Load a ladder and, on Postgres, hold its row lock until the transaction ends
/// so a concurrent deactivation cannot interleave with a report or join.
pub async fn find_by_id_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<ladders::Model>, sea_orm::DbErr> {
    let query = ladders::Entity::find_by_id(id);
    match conn.get_database_backend() {
        DbBackend::Postgres => query.lock_exclusive().one(conn).await,
        _ => query.one(conn).await,
    }
}

pub async fn create_ladder<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: LadderCreate,
    now: OffsetDateTime,
) -> Result<ladders::Model, sea_orm::DbErr> {
    let active = ladders::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        password: Set(dto.password),
        start_date: Set(dto.start_date),
        end_date: Set(dto.end_date),
        created_by: Set(dto.created_by),
        is_active: Set(true),
        algorithm: Set(dto.algorithm),
        created_at: Set(now),
    };
    active.insert(conn).await
}

pub async fn set_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    is_active: bool,
) -> Result<ladders::Model, sea_orm::DbErr> {
    let ladder = ladders::ActiveModel {
        id: Set(id),
        name: NotSet,
        password: NotSet,
        start_date: NotSet,
        end_date: NotSet,
        created_by: NotSet,
        is_active: Set(is_active),
        algorithm: NotSet,
        created_at: NotSet,
    };
    ladder.update(conn).await
}

/// All ladders, newest first.
pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<ladders::Model>, sea_orm::DbErr> {
    ladders::Entity::find()
        .order_by_desc(ladders::Column::CreatedAt)
        .order_by_desc(ladders::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_creator<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<ladders::Model>, sea_orm::DbErr> {
    ladders::Entity::find()
        .filter(ladders::Column::CreatedBy.eq(user_id))
        .order_by_desc(ladders::Column::CreatedAt)
        .order_by_desc(ladders::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: Vec<i64>,
) -> Result<Vec<ladders::Model>, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    ladders::Entity::find()
        .filter(ladders::Column::Id.is_in(ids))
        .all(conn)
        .await
}

pub async fn find_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<ladders::Model>, sea_orm::DbErr> {
    ladders::Entity::find()
        .filter(ladders::Column::IsActive.eq(true))
        .all(conn)
        .await
}

/// Clear `is_active` on the given ladders that are still active; returns rows changed.
/// Flip one ladder to inactive if it still is active. True when this call
/// changed the row.
pub async fn deactivate_if_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let result = ladders::Entity::update_many()
        .col_expr(ladders::Column::IsActive, Expr::value(false))
        .filter(ladders::Column::Id.eq(id))
        .filter(ladders::Column::IsActive.eq(true))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}
