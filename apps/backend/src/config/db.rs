use std::env;

use crate::error::AppError;

/// Which database the process talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbProfile {
    /// Production Postgres database
    Prod,
    /// Postgres test database; the name must end with `_test`
    Test,
    /// Private SQLite database living in memory, one per connection pool
    InMemory,
    /// SQLite database file
    SqliteFile { file: String },
}

/// Credential set used to connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// Build a connection URL from environment variables for `profile` and `owner`.
///
/// SQLite profiles ignore `owner`.
pub fn db_url(profile: &DbProfile, owner: DbOwner) -> Result<String, AppError> {
    match profile {
        DbProfile::InMemory => Ok("sqlite::memory:".to_string()),
        DbProfile::SqliteFile { file } => Ok(format!("sqlite://{file}?mode=rwc")),
        DbProfile::Prod | DbProfile::Test => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = db_name(profile)?;
            let (username, password) = credentials(owner)?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
    }
}

/// True for profiles backed by SQLite.
pub fn is_sqlite(profile: &DbProfile) -> bool {
    matches!(profile, DbProfile::InMemory | DbProfile::SqliteFile { .. })
}

fn db_name(profile: &DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
        _ => must_var("PROD_DB"),
    }
}

fn credentials(owner: DbOwner) -> Result<(String, String), AppError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((
            must_var("LADDER_OWNER_USER")?,
            must_var("LADDER_OWNER_PASSWORD")?,
        )),
    }
}

/// Required environment variable, or a config error naming it.
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
