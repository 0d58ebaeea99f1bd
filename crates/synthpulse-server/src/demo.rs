//! Demo traffic endpoints with simulated latency.
//!
//! Each handler sleeps a bounded random interval so dashboards have
//! something to look at, then counts itself in `http_requests_total`.

use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rand::Rng;
use serde_json::json;

use crate::app_state::AppState;

/// Chance that `/api/users` fails with a 500.
const USERS_ERROR_RATE: f64 = 0.05;

pub async fn home(State(state): State<AppState>) -> Response {
    simulate_work(100, 500).await;

    if let Err(resp) = record(&state, "/", 200) {
        return resp;
    }
    (StatusCode::OK, "Welcome to the synthpulse metrics demo!").into_response()
}

pub async fn api_users(State(state): State<AppState>) -> Response {
    simulate_work(50, 300).await;

    if roll(USERS_ERROR_RATE) {
        if let Err(resp) = record(&state, "/api/users", 500) {
            return resp;
        }
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
    }

    if let Err(resp) = record(&state, "/api/users", 200) {
        return resp;
    }
    Json(json!({ "users": ["alice", "bob", "charlie"], "count": 3 })).into_response()
}

pub async fn api_load(State(state): State<AppState>) -> Response {
    simulate_work(1000, 3000).await;

    if let Err(resp) = record(&state, "/api/load", 200) {
        return resp;
    }
    Json(json!({ "message": "Heavy processing completed" })).into_response()
}

/// Count the request, mapping a recording failure to a 500.
pub(crate) fn record(state: &AppState, endpoint: &str, status: u16) -> Result<(), Response> {
    state.record_request("GET", endpoint, status).map_err(|e| {
        tracing::error!(error = %e, endpoint, "failed to record request");
        (StatusCode::INTERNAL_SERVER_ERROR, "metrics recording failed").into_response()
    })
}

async fn simulate_work(lo_ms: u64, hi_ms: u64) {
    // ThreadRng is !Send; keep the draw out of the await.
    let ms = {
        let mut rng = rand::rng();
        rng.random_range(lo_ms..=hi_ms)
    };
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn roll(p: f64) -> bool {
    rand::rng().random_bool(p)
}
