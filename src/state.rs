use classdesk_config::{CorsConfig, DatabaseConfig, JwtConfig};
use classdesk_db::{Stores, init_db_pool, run_migrations};

#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(stores: Stores, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            stores,
            jwt_config,
            cors_config,
        }
    }
}

/// Opens the configured store. Without `DATABASE_URL` the server runs on the
/// in-memory backend.
pub async fn init_stores(database_config: &DatabaseConfig) -> anyhow::Result<Stores> {
    match &database_config.url {
        Some(url) => {
            let pool = init_db_pool(url, database_config.max_connections).await?;
            run_migrations(&pool).await?;
            tracing::info!("using postgres store");
            Ok(Stores::postgres(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, data will not survive a restart");
            Ok(Stores::in_memory())
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let stores = init_stores(&DatabaseConfig::from_env()).await?;

    Ok(AppState::new(
        stores,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
