//! PostgreSQL pool and schema management
//!
//! The pool is the only state shared between requests. Pool sizing and
//! timeouts come from [`DatabaseConfig`].

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

const APPLICATION_NAME: &str = "gym-groups";

/// Pool options derived from configuration, without connecting
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .test_before_acquire(true)
}

/// Connect to the configured database
///
/// Connects eagerly so an unreachable database fails startup.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&config.url)
        .context("invalid database URL")?
        .application_name(APPLICATION_NAME);

    let pool = pool_options(config)
        .connect_with(connect_options)
        .await
        .context("failed to connect to database")?;

    info!(
        max = config.max_connections,
        min = config.min_connections,
        "Database pool created"
    );

    Ok(pool)
}

/// Apply pending migrations from `backend/migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("failed to run migrations")?;
    info!("Database schema is up to date");
    Ok(())
}

/// Round-trip a trivial query, used by the readiness probe
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map_err(|e| {
        warn!(error = %e, "Database health check failed");
        e
    })?;
    Ok(())
}
