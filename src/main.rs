//! NDN Content Store node host
//!
//! Runs the configured nodes' content stores with their expiration and
//! reporting timers, and serves the admin API.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ndn_cs::api::create_router;
use ndn_cs::config::ExpirationMode;
use ndn_cs::{spawn_expiration_sweep, spawn_size_reporter, AppState, Config, TimerHandle};

/// Main entry point for the content store host.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create one content store per configured node
/// 4. Start expiration sweeps and the size reporter
/// 5. Serve the admin API until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ndn_cs=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting NDN Content Store");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: nodes={}, policy={}, max_payload={:?}, expiration={:?}, port={}",
        config.nodes.len(),
        config.policy,
        config.max_payload_size,
        config.expiration,
        config.server_port
    );

    let state = AppState::from_config(&config);

    let mut timers: Vec<TimerHandle> = Vec::new();
    if let ExpirationMode::Eager { interval } = config.expiration {
        for node in state.nodes.iter() {
            timers.push(spawn_expiration_sweep(node.clone(), interval));
        }
    }
    if let Some(interval) = config.report_interval {
        timers.push(spawn_size_reporter(state.nodes.clone(), interval));
    }
    info!("{} background timers started", timers.len());

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Admin API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(timers))
        .await
        .context("server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then cancels every timer.
async fn shutdown_signal(timers: Vec<TimerHandle>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
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

    let running = timers.iter().filter(|timer| !timer.is_finished()).count();
    for timer in &timers {
        timer.cancel();
    }
    warn!("{} of {} background timers cancelled", running, timers.len());
}
