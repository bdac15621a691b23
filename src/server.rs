//! HTTP server initialization and runtime setup.
//!
//! Handles the data directory, database pool, schema, and the Axum server
//! lifecycle.

use crate::application::services::{AuthService, LinkService};
use crate::config::Config;
use crate::infrastructure::persistence::{SqliteLinkRepository, pool};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Data directory (when no explicit `DATABASE_URL` is set)
/// - SQLite connection pool
/// - `links` schema
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The data directory cannot be created
/// - Database connection or schema setup fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    if config.database_url.is_none() {
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!(
                "Unable to create data directory {}",
                config.data_dir.display()
            )
        })?;
    }

    let pool = pool::connect(
        &config.resolved_database_url(),
        config.db_max_connections,
        Duration::from_secs(config.db_busy_timeout),
    )
    .await
    .context("Failed to open database")?;
    tracing::info!("Connected to database");

    let link_repository = SqliteLinkRepository::new(Arc::new(pool))
        .await
        .context("Failed to prepare database schema")?;

    let state = AppState::new(
        Arc::new(LinkService::new(Arc::new(link_repository))),
        Arc::new(AuthService::new(config.secret.clone())),
        config.base_url.clone(),
        config.max_body_bytes,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
