//! Runtime configuration from environment. Loaded once at startup and passed
//! down; nothing reads the environment after construction, so tests can build
//! the struct directly.

use crate::error::AppError;

const DATABASE_URL: &str = "DATABASE_URL";
const BIND_ADDR: &str = "BIND_ADDR";
const PG_MAX_CONNECTIONS: &str = "PG_MAX_CONNECTIONS";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
}

impl AppConfig {
    /// Read config from env (a `.env` file is honored if present).
    /// `DATABASE_URL` is required; the rest have defaults.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let database_url = std::env::var(DATABASE_URL)
            .map_err(|_| AppError::Config(format!("{} is not set", DATABASE_URL)))?;
        let bind_addr = std::env::var(BIND_ADDR).unwrap_or_else(|_| "0.0.0.0:3000".into());
        let max_connections = match std::env::var(PG_MAX_CONNECTIONS) {
            Ok(v) => v.parse().map_err(|_| {
                AppError::Config(format!("{} must be a positive integer", PG_MAX_CONNECTIONS))
            })?,
            Err(_) => 5,
        };
        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
        })
    }
}
