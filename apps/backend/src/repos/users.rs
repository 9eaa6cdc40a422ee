//! User repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::users_sea as users_adapter;
use crate::entities::users;
use crate::errors::domain::DomainError;

/// User domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub last_login: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            image_url: model.image_url,
            last_login: model.last_login,
            created_at: model.created_at,
        }
    }
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

pub async fn find_user_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_email(conn, email).await?;
    Ok(user.map(User::from))
}

pub async fn find_users_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: Vec<i64>,
) -> Result<Vec<User>, DomainError> {
    let users = users_adapter::find_by_ids(conn, ids).await?;
    Ok(users.into_iter().map(User::from).collect())
}

/// Insert-or-refresh by email. Returns the user and whether it was created.
pub async fn upsert_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    name: &str,
    image_url: Option<&str>,
    now: OffsetDateTime,
) -> Result<(User, bool), DomainError> {
    let mut dto = users_adapter::UserUpsert::new(email, name);
    if let Some(url) = image_url {
        dto = dto.with_image_url(url);
    }

    let (model, inserted) = users_adapter::insert_if_absent(conn, dto, now).await?;
    if inserted {
        return Ok((User::from(model), true));
    }

    let refreshed = users_adapter::touch_login(
        conn,
        model,
        name.to_string(),
        image_url.map(str::to_string),
        now,
    )
    .await?;
    Ok((User::from(refreshed), false))
}
