//! `serve` command implementation.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

use vet_relay_server::{create_router, AppState};

use crate::cli::ServeArgs;

/// Execute the `serve` command
pub async fn run_serve(args: &ServeArgs) -> Result<()> {
    let mut config =
        config_loader::ConfigLoader::load_from_env().context("Failed to load configuration")?;

    // Apply CLI overrides
    if let Some(port) = args.port {
        info!(port, "Overriding listen port from CLI");
        config.port = port;
    }

    info!(
        telegram = config.telegram_configured(),
        make = config.webhook_configured(),
        port = config.port,
        "Configuration loaded"
    );

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)
            .context("Failed to start metrics endpoint")?;
    }

    let port = config.port;
    let state = AppState::new(config).context("Failed to initialize sinks")?;

    announce_startup(&state, port);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(addr = %listener.local_addr()?, "vet-relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server exited with error")?;

    info!("Server closed cleanly");
    Ok(())
}

/// Best-effort startup notification to the chat sink.
///
/// Runs detached; a failure is logged and never blocks startup.
fn announce_startup(state: &AppState, port: u16) {
    let Some(telegram) = state.coordinator.telegram().cloned() else {
        return;
    };

    tokio::spawn(async move {
        match telegram.get_me().await {
            Ok(username) => {
                info!(bot = %username, "Telegram bot identity confirmed");
                match telegram.send_startup_message(port).await {
                    Ok(()) => info!("Startup notification sent to Telegram"),
                    Err(e) => warn!(error = %e, "Startup notification failed"),
                }
            }
            Err(e) => warn!(error = %e, "Telegram startup check failed"),
        }
    });
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    warn!("Shutdown signal received, closing server...");
}
