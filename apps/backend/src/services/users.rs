use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, PreconditionKind};
use crate::repos::users::{self as users_repo, User};

/// Canonical form used for every email lookup: NFKC, trimmed, lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

/// Make sure a user row exists for this identity and record the login.
///
/// Idempotent per email: repeat calls refresh `last_login` (and the
/// profile fields when they changed) and return the same user.
pub async fn ensure_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    name: &str,
    image_url: Option<&str>,
    now: OffsetDateTime,
) -> Result<User, AppError> {
    let email = normalize_email(email);
    if email.is_empty() {
        return Err(DomainError::validation_other("Email is required").into());
    }
    let name = match name.trim() {
        "" => email.split('@').next().unwrap_or_default().to_string(),
        trimmed => trimmed.to_string(),
    };

    let (user, created) = users_repo::upsert_user(conn, &email, &name, image_url, now).await?;
    if created {
        info!(user_id = user.id, "user_created");
    } else {
        debug!(user_id = user.id, "user_login_refreshed");
    }
    Ok(user)
}

/// Resolve an authenticated identity to its user row.
///
/// `None` means the caller is not authenticated.
pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: Option<&str>,
) -> Result<User, AppError> {
    let email = email.ok_or_else(|| {
        DomainError::precondition(
            PreconditionKind::UserNotAuthenticated,
            "Sign in to continue",
        )
    })?;

    users_repo::find_user_by_email(conn, &normalize_email(email))
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "User not found").into())
}

pub async fn require_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, AppError> {
    users_repo::find_user_by_id(conn, user_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::User, format!("User {user_id} not found")).into()
        })
}
