//! Marquee server binary.
//!
//! Wires the movie store, the event source and the HTTP API together and
//! serves until Ctrl-C or SIGTERM.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$MARQUEE_CONFIG` or `marquee-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Open the configured movie store (in-memory or `PostgreSQL`)
//! 4. Seed the demo catalogue, if enabled
//! 5. Build the event source and shared API state
//! 6. Install the shutdown signal handler
//! 7. Serve HTTP until shutdown, then close the store

mod config;
mod error;

use std::path::Path;
use std::sync::Arc;

use marquee_api::{AppState, Security};
use marquee_db::{MovieRepository, PostgresPool, seed_movies};
use marquee_events::EventSource;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_CONFIG_PATH, LogFormat, LoggingSection, MarqueeConfig, StoreBackend};
use crate::error::AppError;

/// Application entry point for the Marquee server.
///
/// # Errors
///
/// Returns an error if any initialization step or the server itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so report afterwards.
    let (config, source) =
        MarqueeConfig::load(|key| std::env::var(key).ok(), Path::new(DEFAULT_CONFIG_PATH))
            .map_err(AppError::from)?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("marquee-server starting");
    match &source {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }

    // 3. Open the movie store.
    let (movies, pool) = open_store(&config).await?;
    info!(backend = movies.backend(), "Movie store ready");

    // 4. Seed the demo catalogue.
    if config.seed.enabled {
        let seeded = seed_movies(&movies, &config.seed.titles, config.seed.reset).await?;
        info!(count = seeded.len(), "Demo catalogue seeded");
    }

    // 5. Build shared state.
    let events = EventSource::new(config.events.interval())?;
    let security = Security::new(config.security.users.clone());
    info!(
        interval_ms = config.events.interval_ms,
        auth_enabled = security.is_enabled(),
        users = security.user_count(),
        "Event source and security configured"
    );

    let shutdown = CancellationToken::new();
    let state = Arc::new(
        AppState::new(movies, events)
            .with_security(security)
            .with_shutdown(shutdown.clone()),
    );

    // 6. Cancel the shared token on Ctrl-C / SIGTERM.
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.cancel();
    });

    // 7. Serve until shutdown.
    let result = marquee_api::start_server(&config.server.to_server_config(), state).await;

    if let Some(pool) = pool {
        pool.close().await;
    }
    result.map_err(AppError::from)?;

    info!("marquee-server stopped");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level`.
fn init_tracing(logging: &LoggingSection) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

/// Open the configured store. The pool is returned so it can be closed on
/// shutdown.
async fn open_store(
    config: &MarqueeConfig,
) -> Result<(MovieRepository, Option<PostgresPool>), AppError> {
    match config.store.backend {
        StoreBackend::Memory => Ok((MovieRepository::in_memory(), None)),
        StoreBackend::Postgres => {
            let pool = PostgresPool::connect(&config.store.to_postgres_config()).await?;
            Ok((MovieRepository::Postgres(pool.movies()), Some(pool)))
        }
    }
}

/// Resolve on Ctrl-C or SIGTERM.
///
/// The caller cancels the shared token, which stops accepting connections
/// and ends every open event stream.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl-C handler");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C"),
        () = terminate => info!("Received SIGTERM"),
    }

    info!("Shutdown signal received, terminating gracefully");
}
