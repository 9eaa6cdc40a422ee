//! SeaORM adapter for users.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::entities::users;

pub mod dto;

pub use dto::UserUpsert;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: Vec<i64>,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    users::Entity::find()
        .filter(users::Column::Id.is_in(ids))
        .all(conn)
        .await
}

/// Insert the user if the email is new; returns the row and whether it was inserted.
pub async fn insert_if_absent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserUpsert,
    now: OffsetDateTime,
) -> Result<(users::Model, bool), sea_orm::DbErr> {
    let email = dto.email.clone();
    let active = users::ActiveModel {
        id: NotSet,
        email: Set(dto.email),
        name: Set(dto.name),
        image_url: Set(dto.image_url),
        last_login: Set(now),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let rows = users::Entity::insert(active)
        .on_conflict(
            OnConflict::column(users::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    let user = find_by_email(conn, &email)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("users.email not found".to_string()))?;

    Ok((user, rows == 1))
}

/// Refresh the login timestamp, and the profile fields when they differ.
pub async fn touch_login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: users::Model,
    name: String,
    image_url: Option<String>,
    now: OffsetDateTime,
) -> Result<users::Model, sea_orm::DbErr> {
    let profile_changed = existing.name != name || existing.image_url != image_url;
    let mut active: users::ActiveModel = existing.into();
    if profile_changed {
        active.name = Set(name);
        active.image_url = Set(image_url);
        active.updated_at = Set(now);
    }
    active.last_login = Set(now);
    active.update(conn).await
}
