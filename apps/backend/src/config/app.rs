use std::env;
use std::time::Duration;

use crate::config::db::must_var;
use crate::error::AppError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3001;
/// Expired ladders are swept once a day unless overridden.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 86_400;

/// Process-level settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub sweep_interval: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = parse_or("BACKEND_PORT", DEFAULT_PORT)?;
        let jwt_secret = must_var("BACKEND_JWT_SECRET")?;
        let sweep_secs = parse_or("LADDER_SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS)?;
        if sweep_secs == 0 {
            return Err(AppError::config(
                "LADDER_SWEEP_INTERVAL_SECS must be greater than zero",
            ));
        }

        Ok(Self {
            host,
            port,
            jwt_secret,
            sweep_interval: Duration::from_secs(sweep_secs),
        })
    }
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("Invalid value for '{name}': '{raw}'"))),
        Err(_) => Ok(default),
    }
}
