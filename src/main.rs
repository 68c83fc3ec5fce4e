use std::sync::Arc;

use anyhow::{Context, Result};
use bookshelf_api::{
    AppConfig, AppState, InMemoryBookRepository, build_router, build_router_with_cors, telemetry,
};
use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();

    let config = AppConfig::parse();

    let state = AppState::new(Arc::new(InMemoryBookRepository::new()), config.filter_mode);
    let app = if config.cors_any_origin {
        build_router_with_cors(state)
    } else {
        build_router(state)
    };

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(
        address = %addr,
        filter_mode = ?config.filter_mode,
        "bookshelf api started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let signal = wait_for_stop().await;
            info!(signal, "shutdown requested, draining connections");
        })
        .await
        .context("server error")?;

    info!("bookshelf api stopped");
    Ok(())
}

/// Resolve once the process is asked to stop, returning the signal name.
async fn wait_for_stop() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => tokio::select! {
                name = ctrl_c_only() => name,
                _ = sigterm.recv() => "SIGTERM",
            },
            Err(err) => {
                error!(error = %err, "SIGTERM listener unavailable, waiting for ctrl-c only");
                ctrl_c_only().await
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c_only().await
    }
}

async fn ctrl_c_only() -> &'static str {
    match tokio::signal::ctrl_c().await {
        Ok(()) => "SIGINT",
        Err(err) => {
            error!(error = %err, "ctrl-c listener failed");
            std::future::pending().await
        }
    }
}
