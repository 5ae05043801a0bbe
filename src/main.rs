//! kvserver - An in-memory key-value HTTP server
//!
//! Every entry expires a fixed TTL after its last write.

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kvserver::api::create_router;
use kvserver::{spawn_eviction_task, AppState, Config, EvictionScheduler, KvStore};

/// Main entry point for the key-value server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Parse configuration from flags and environment variables
/// 3. Create the storage engine
/// 4. Start the background TTL eviction task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on the configured address
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kvserver=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting kvserver");

    let config = Config::parse();
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: ttl={}s, ttl_delim={}, listen={}",
        config.ttl,
        config.ttl_delim,
        config.socket_addr()
    );

    let state = AppState::new(KvStore::new());

    let scheduler = EvictionScheduler::new(state.store.clone(), config.ttl())
        .context("cannot initialize eviction scheduler")?
        .with_ttl_delim(config.ttl_delim);
    let eviction_handle = spawn_eviction_task(scheduler);
    info!("Background eviction task started");

    let app = create_router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(eviction_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the eviction task.
async fn shutdown_signal(eviction_handle: JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    eviction_handle.abort();
    warn!("Eviction task aborted");
}
