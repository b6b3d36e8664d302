//! HTTP server initialization and runtime setup.
//!
//! Handles storage setup, service wiring and the Axum server lifecycle.

use crate::application::services::UrlService;
use crate::config::{Config, StorageBackend};
use crate::infrastructure::persistence::{InMemoryMappingRepository, PgMappingRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::Sha256CodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens a PostgreSQL connection pool using the configured pool settings.
///
/// # Errors
///
/// Returns an error if the database is unreachable within the acquire timeout.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    Ok(pool)
}

/// Builds the URL service over the configured storage backend.
///
/// For PostgreSQL the mapping table is created if it does not exist yet.
///
/// # Errors
///
/// Returns an error if the database connection or schema setup fails.
pub async fn build_url_service(config: &Config) -> Result<Arc<UrlService>> {
    let generator = Arc::new(Sha256CodeGenerator::new());

    let service = match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = connect_pool(config).await?;
            let repository = PgMappingRepository::new(Arc::new(pool), &config.table_name);
            repository
                .ensure_schema()
                .await
                .context("Failed to create mapping table")?;

            UrlService::new(Arc::new(repository), generator)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; mappings are lost on restart");
            let repository = InMemoryMappingRepository::with_table_name(&config.table_name);

            UrlService::new(Arc::new(repository), generator)
        }
    };

    Ok(Arc::new(service))
}

/// Runs the HTTP server with the given configuration.
///
/// Stops gracefully on Ctrl+C.
///
/// # Errors
///
/// Returns an error if:
/// - Storage setup fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let url_service = build_url_service(&config).await?;
    let state = AppState::new(url_service, config.base_url.clone());

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }

    tracing::info!("Shutdown signal received");
}
