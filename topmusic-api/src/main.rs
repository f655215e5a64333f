//! topmusic-api - Song catalog service
//!
//! Serves the song collection over HTTP. When `reset_db` is set the
//! collection is cleared and reseeded from the dataset before the listener
//! binds.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use topmusic_api::cli::Args;
use topmusic_api::{build_router, bundled_dataset_path, AppState};
use topmusic_common::config::{CompiledDefaults, ConfigSource, ServiceConfig, TomlConfig};
use topmusic_common::db::{open_database, SongCollection, SqliteSongCollection};
use topmusic_common::seed::{load_dataset, reset_collection};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (toml, source) =
        TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let defaults = CompiledDefaults {
        dataset: bundled_dataset_path(),
        ..CompiledDefaults::for_current_platform()
    };
    let config = ServiceConfig::resolve(args.overrides(), toml, defaults);

    // Initialize tracing
    let default_filter = format!(
        "topmusic_api={level},topmusic_common={level},tower_http={level}",
        level = config.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Top Music API (topmusic-api) v{}",
        env!("CARGO_PKG_VERSION")
    );
    match &source {
        ConfigSource::File(path) => info!("Loaded config file: {}", path.display()),
        ConfigSource::Missing(path) => {
            warn!("Config file not found: {} (using defaults)", path.display())
        }
        ConfigSource::NotRequested => {}
    }

    info!("Database: {}", config.database);
    let pool = open_database(&config.database)
        .await
        .context("Failed to open song database")?;
    let songs: Arc<dyn SongCollection> = Arc::new(SqliteSongCollection::new(pool));

    if config.reset_db {
        seed(songs.as_ref(), &config.dataset).await;
    }

    match songs.count().await {
        Ok(count) => info!("✓ Song collection ready ({} records)", count),
        Err(e) => warn!("Could not count song records: {}", e),
    }

    let app = build_router(AppState::new(songs));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("topmusic-api listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Reset the collection from the dataset
///
/// Failures are logged and the server still starts with whatever the
/// collection holds.
async fn seed(songs: &dyn SongCollection, dataset: &Path) {
    info!("Resetting song collection from {}", dataset.display());

    let entries = match load_dataset(dataset) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to load dataset {}: {}", dataset.display(), e);
            return;
        }
    };

    match reset_collection(songs, entries).await {
        Ok(report) if report.is_complete() => {
            info!("✓ Seeded {} songs", report.inserted);
        }
        Ok(report) => {
            warn!(
                "Seeded {} songs, {} rejected (first: {})",
                report.inserted,
                report.failed,
                report.first_failure.as_deref().unwrap_or("unknown")
            );
        }
        Err(e) => error!("Failed to reset song collection: {}", e),
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
