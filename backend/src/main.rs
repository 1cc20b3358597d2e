//! Gym Groups Backend
//!
//! Manages gym group memberships and their activity status.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Input validation and business rules
//! - Repositories: Data access
//! - Database: PostgreSQL with SQLx

use anyhow::Result;
use gym_groups_backend::{config, db, routes, state::AppState, telemetry};
use std::time::Duration;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::AppConfig::load()?;

    // Initialize tracing
    telemetry::init(&config.logging)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = %config.environment,
        "Starting Group Service"
    );

    // Validate production configuration
    if config.is_production() {
        validate_production_config(&config)?;
    }

    // Create database pool
    info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database).await?;

    // Run migrations (skip in production if using separate migration job)
    if !config.is_production() {
        db::run_migrations(&db_pool).await?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_secs);

    // Create application state
    let state = AppState::new(db_pool.clone(), config);

    // Build application
    let app = routes::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = shutdown_tx.send(true);
            })
            .await
    });

    // Resolves on a shutdown signal, or early if the server task exits first
    let _ = shutdown_rx.changed().await;

    // In-flight requests get `grace` to finish
    match tokio::time::timeout(grace, server).await {
        Ok(Ok(Ok(()))) => info!("All connections drained"),
        Ok(Ok(Err(e))) => error!("Server error: {}", e),
        Ok(Err(e)) => error!("Server task failed: {}", e),
        Err(_) => warn!(
            grace_secs = grace.as_secs(),
            "Grace period elapsed, dropping remaining connections"
        ),
    }

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Validate configuration for production deployment
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.jwt.secret.len() < 32 {
        errors.push("JWT secret must be at least 32 characters");
    }

    // Check database URL is not localhost in production
    if config.database.url.contains("localhost") || config.database.url.contains("127.0.0.1") {
        warn!("Database URL contains localhost - ensure this is intentional for production");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
