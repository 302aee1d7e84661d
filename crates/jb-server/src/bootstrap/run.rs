//! Process entry: config, logging, wiring, serve, shutdown.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::bootstrap::config::load_config;
use crate::bootstrap::tracing::init_tracing_subscriber;
use crate::bootstrap::wiring::wire_dependencies;
use crate::http::{build_router, AppState};

/// Run the server until SIGINT or SIGTERM, then checkpoint the store.
pub async fn run() -> anyhow::Result<()> {
    // A missing .env file is normal outside development
    dotenvy::dotenv().ok();

    let config = load_config().context("Failed to load configuration")?;
    init_tracing_subscriber(config.log_dir.as_deref())?;

    let wired = wire_dependencies(&config)?;
    let state = AppState::new(wired.app.clone(), config.http.trust_proxy_hops);
    let router = build_router(state, &config)?;

    let addr = format!("{}:{}", config.http.host, config.http.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Server running");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server error")?;

    info!("HTTP server stopped, closing store");
    let executor = wired.executor.clone();
    tokio::task::spawn_blocking(move || executor.checkpoint())
        .await
        .context("Checkpoint task failed")??;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("SIGINT received, shutting down"),
            Err(err) => {
                error!("failed to install Ctrl+C handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("SIGTERM received, shutting down");
            }
            Err(err) => {
                error!("failed to install SIGTERM handler: {}", err);
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
}
