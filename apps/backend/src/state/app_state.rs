use std::fmt;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use time::OffsetDateTime;

use super::security_config::SecurityConfig;
use crate::clock::Clock;

/// Shared resources handed to every request handler and the sweep task.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// JWT settings
    pub security: SecurityConfig,
    clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            db,
            security,
            clock,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .field("security", &self.security)
            .finish_non_exhaustive()
    }
}
