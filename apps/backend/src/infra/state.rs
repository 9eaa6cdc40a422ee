use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::db::{DbOwner, DbProfile};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState`, shared by `main` and the integration suites.
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: DbProfile,
    clock: Arc<dyn Clock>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_profile: DbProfile::InMemory,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = profile;
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Connect, migrate, and assemble the state.
    pub async fn build(self) -> Result<AppState, AppError> {
        let conn = bootstrap_db(self.db_profile, DbOwner::App).await?;
        Ok(AppState::new(conn, self.security_config, self.clock))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
