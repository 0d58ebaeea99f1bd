//! synthpulse demo service.
//!
//! - Demo endpoints: `/`, `/api/users`, `/api/load`, `/health`
//! - Prometheus text exposition at `/metrics`
//! - Background task simulating the `active_users_count` gauge

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use synthpulse_server::{app_state, config, router, updater};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "synthpulse.yaml".to_string());
    let cfg = if std::path::Path::new(&path).exists() {
        config::load_from_file(&path).expect("config load failed")
    } else {
        tracing::warn!(%path, "config file not found, using defaults");
        config::AppConfig::default()
    };

    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("metric registration failed");

    // The updater must be live before the first request is served.
    let upd = updater::MetricsUpdater::active_users(
        &state.cfg().updater,
        state.active_users().clone(),
    );

    let app = router::build_router(state);

    tracing::info!(%listen, "synthpulse starting");
    tracing::info!("metrics at /metrics (http_requests_total, active_users_count)");
    tracing::info!("demo endpoints: / /api/users /api/load /health");

    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");

    upd.shutdown().await;
    tracing::info!("synthpulse stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "ctrl-c handler failed");
    }
}
