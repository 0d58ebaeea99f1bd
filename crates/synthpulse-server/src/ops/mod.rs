//! Operational HTTP endpoints.
//!
//! - `/health`  : liveness, counted like any other request
//! - `/metrics` : Prometheus text format

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app_state::AppState;
use crate::demo::record;

pub async fn health(axum::extract::State(state): axum::extract::State<AppState>) -> Response {
    if let Err(resp) = record(&state, "/health", 200) {
        return resp;
    }

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);

    Json(json!({ "status": "healthy", "timestamp": timestamp })).into_response()
}

pub async fn metrics(axum::extract::State(state): axum::extract::State<AppState>) -> Response {
    let body = state.registry().export();

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
