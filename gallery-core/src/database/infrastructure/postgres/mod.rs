/// Repository implementations over a `PgPool`
pub mod repositories;

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::error::{GalleryError, Result};

pub use repositories::images::PostgresImageRepository;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Open a connection pool for `database_url`.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect(database_url)
        .await
        .map_err(|e| {
            GalleryError::Internal(format!("Failed to connect to PostgreSQL: {e}"))
        })?;
    info!("Connected to PostgreSQL");
    Ok(pool)
}

/// Apply the embedded schema migrations.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    crate::MIGRATOR
        .run(pool)
        .await
        .map_err(|e| GalleryError::Internal(format!("Migration failed: {e}")))?;
    info!("Database migrations applied");
    Ok(())
}
