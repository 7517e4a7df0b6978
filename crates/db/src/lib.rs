//! Storage adapters for the job repository.
//!
//! [`repositories::PgJobRepo`] persists jobs in PostgreSQL;
//! [`repositories::InMemoryJobRepo`] keeps them in process memory.
//! [`open_job_repository`] picks one from [`config::DbConfig`].

use std::sync::Arc;
use std::time::Duration;

use jobstore_core::error::DataAccessError;
use jobstore_core::repository::JobRepository;
use jobstore_core::types::DbId;
use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod models;
pub mod repositories;

use config::{DbConfig, StoreBackend};
use repositories::{InMemoryJobRepo, PgJobRepo};

pub type DbPool = sqlx::PgPool;

/// Shared handle to whichever adapter the configuration selected.
pub type SharedJobRepository = Arc<dyn JobRepository<Id = DbId>>;

/// Create a connection pool from a database URL.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}

/// Run a trivial query to verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Build the repository selected by `config`.
///
/// For PostgreSQL this connects, checks health and applies migrations
/// before handing the adapter out.
pub async fn open_job_repository(config: &DbConfig) -> Result<SharedJobRepository, DataAccessError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory job store");
            Ok(Arc::new(InMemoryJobRepo::new()))
        }
        StoreBackend::Postgres => {
            let database_url = config.database_url.as_deref().ok_or_else(|| {
                DataAccessError::Invalid("DATABASE_URL must be set for the postgres store".into())
            })?;

            let pool = create_pool(
                database_url,
                config.max_connections,
                Duration::from_secs(config.acquire_timeout_secs),
            )
            .await
            .map_err(|e| DataAccessError::store("connect", e))?;
            tracing::info!(max_connections = config.max_connections, "Database connection pool created");

            health_check(&pool)
                .await
                .map_err(|e| DataAccessError::store("health_check", e))?;
            tracing::info!("Database health check passed");

            run_migrations(&pool)
                .await
                .map_err(|e| DataAccessError::store("migrate", e))?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgJobRepo::new(pool)))
        }
    }
}
