use crate::catalog::Catalog;
use crate::memory::MemoryCatalog;
use crate::postgres::PgCatalog;
use anyhow::Context;
use darkroom_core::{CatalogBackend, Config};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

/// Create a catalog backend based on configuration
///
/// The Postgres backend connects and runs embedded migrations before the
/// server starts accepting requests.
pub async fn create_catalog(config: &Config) -> Result<Arc<dyn Catalog>, anyhow::Error> {
    match config.catalog_backend {
        CatalogBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL not configured")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;

            sqlx::migrate!("../../migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;

            tracing::info!(
                max_connections = config.db_max_connections,
                "Catalog initialized (postgres)"
            );

            Ok(Arc::new(PgCatalog::new(pool)))
        }
        CatalogBackend::Memory => {
            tracing::warn!("Using in-memory catalog; photos will not survive restarts");
            Ok(Arc::new(MemoryCatalog::new()))
        }
    }
}
