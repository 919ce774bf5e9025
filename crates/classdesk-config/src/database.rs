//! Database configuration.
//!
//! Postgres is optional. When `DATABASE_URL` is absent the server runs on the
//! in-memory store, which keeps nothing across restarts.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: Postgres connection string (optional)
//! - `DATABASE_MAX_CONNECTIONS`: pool size, defaults to 10

use std::env;

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        }
    }
}
