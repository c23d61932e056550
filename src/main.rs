mod api;
mod app_state;
mod core;
mod debug;
mod domain;
mod errors;
mod routes;

use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::domain::telemetry::dto::load_source_request::LoadSourceRequest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_dir = crate::core::persistence::storage_path::data_dir().join("logs");
    let file_appender = tracing_appender::rolling::daily(&log_dir, "apiscope-core.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    let state = app_state::build_app_state();

    // Optional preload so the API starts with a snapshot already in place.
    if let Ok(path) = std::env::var("TELEMETRY_SOURCE") {
        match state
            .source_service
            .load_source(LoadSourceRequest { path: path.clone() })
            .await
        {
            Ok(status) => info!(rows = status.rows, "preloaded telemetry source {path}"),
            Err(e) => warn!("could not preload {path}: {e:#}"),
        }
    }

    if std::env::var("APISCOPE_DEBUG_MODE").is_ok() {
        debug::run_debug().await;
        return Ok(());
    }

    let port: u16 = std::env::var("APISCOPE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = routes::app_router().with_state(state);

    info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to install ctrl-c handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {e}");
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
    info!("shutdown signal received");
}
