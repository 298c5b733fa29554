//! Short Store - An in-memory short code allocator
//!
//! Binary entry point: HTTP server plus the expiration sweeper.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use short_store::api::create_router;
use short_store::clock::SystemClock;
use short_store::store::MemoryStore;
use short_store::{spawn_expiration_sweeper, AppState, Config, ShortenerService};

/// Main entry point for the short code server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Create store, generator, clock and service
/// 4. Start background expiration sweeper
/// 5. Start HTTP server on configured port
/// 6. On SIGINT/SIGTERM, drain requests then stop the sweeper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "short_store=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting short code server");

    let config = Config::from_env();
    config.validate().context("invalid configuration")?;
    info!(
        port = config.server_port,
        code_length = config.code_length,
        default_ttl_secs = config.default_ttl,
        max_attempts = config.max_attempts,
        sweep_interval_secs = config.sweep_interval,
        "Configuration loaded"
    );

    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(SystemClock);
    let service = Arc::new(
        ShortenerService::from_config(&config, store.clone(), clock.clone())
            .context("building shortener service")?,
    );

    let state = AppState::new(service.clone(), &config);
    let shutdown = state.shutdown.clone();

    let sweeper = spawn_expiration_sweeper(
        store,
        clock,
        config.sweep_interval(),
        shutdown.child_token(),
    );

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    let serve =
        axum::serve(listener, app).with_graceful_shutdown(shutdown.clone().cancelled_owned());
    let mut server = tokio::spawn(async move { serve.await });

    tokio::select! {
        result = &mut server => {
            result.context("server task failed")?.context("server error")?;
        }
        _ = shutdown_signal() => {
            shutdown.cancel();
            match tokio::time::timeout(config.shutdown_timeout(), &mut server).await {
                Ok(result) => result.context("server task failed")?.context("server error")?,
                Err(_) => {
                    warn!("Graceful shutdown timed out, dropping open connections");
                    server.abort();
                }
            }
        }
    }

    shutdown.cancel();
    service.shutdown();
    if let Err(e) = sweeper.await {
        warn!(error = %e, "Expiration sweeper ended abnormally");
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
