use std::sync::Arc;

use anyhow::{Context, Result};
use gallery_core::database::{
    infrastructure::{
        memory::{InMemoryImageRepository, InMemorySessionStore},
        postgres::{self, PostgresImageRepository},
        redis::RedisSessionStore,
    },
    ports::{images::ImageRepository, sessions::SessionStore},
};
use tracing::{info, warn};

use crate::infra::{app_state::AppState, config::Config};

/// Connect the configured backends and assemble the shared state.
///
/// PostgreSQL and Redis are used when their URLs are configured; otherwise
/// the process-local stores stand in, which only suits a single instance.
pub async fn wire_app_state(config: Config) -> Result<AppState> {
    let images: Arc<dyn ImageRepository> = match config.database_url.as_deref() {
        Some(url) => {
            let pool = postgres::connect(url)
                .await
                .context("failed to connect to PostgreSQL")?;
            postgres::migrate(&pool)
                .await
                .context("database migration failed")?;
            Arc::new(PostgresImageRepository::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; images are kept in memory");
            Arc::new(InMemoryImageRepository::new())
        }
    };

    let sessions: Arc<dyn SessionStore> = match config.redis_url.as_deref() {
        Some(url) => Arc::new(
            RedisSessionStore::new(url, config.session_ttl())
                .await
                .context("failed to connect to Redis")?,
        ),
        None => {
            info!("REDIS_URL not set; sessions are kept in memory");
            Arc::new(InMemorySessionStore::with_ttl(config.session_ttl()))
        }
    };

    Ok(AppState::new(images, sessions, config))
}

/// Apply schema migrations against `database_url` and return.
pub async fn run_migrations(database_url: &str) -> Result<()> {
    let pool = postgres::connect(database_url)
        .await
        .context("failed to connect to PostgreSQL for migration")?;
    postgres::migrate(&pool)
        .await
        .context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}
