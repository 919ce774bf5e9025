//! # Classdesk DB
//!
//! Storage for the Classdesk API.
//!
//! Each collection is reached through a trait ([`AccountStore`],
//! [`ClassroomStore`], [`SubjectStore`]) with two implementations: an
//! in-memory backend used when no database is configured (and by the test
//! suite), and a Postgres backend built on SQLx.
//!
//! # Example
//!
//! ```ignore
//! use classdesk_db::{Stores, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&database_url, 10).await?;
//! run_migrations(&pool).await?;
//! let stores = Stores::postgres(pool);
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use error::{StoreError, StoreResult};
pub use sqlx::PgPool;
pub use store::{AccountStore, ClassroomStore, Stores, SubjectStore};

/// Opens a Postgres connection pool.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> StoreResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Applies the embedded migrations in `crates/classdesk-db/migrations`.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("database migrations applied");
    Ok(())
}
