//! Axum router wiring.
//!
//! Demo traffic endpoints plus the ops pair (`/health`, `/metrics`).

use axum::{routing::get, Router};

use crate::{app_state::AppState, demo, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(demo::home))
        .route("/api/users", get(demo::api_users))
        .route("/api/load", get(demo::api_load))
        .route("/health", get(ops::health))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
