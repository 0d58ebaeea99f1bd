//! Shared application state.
//!
//! Each instance carries its own registry, so two servers (or two tests)
//! never share metric storage.

use std::sync::Arc;

use synthpulse_core::error::Result;
use synthpulse_core::{Counter, Gauge, Registry};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: AppConfig,
    registry: Registry,
    requests: Counter,
    active_users: Gauge,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: AppConfig) -> Result<Self> {
        let registry = Registry::new();

        let requests = registry.register_counter(
            "http_requests_total",
            "Total HTTP requests",
            &["method", "endpoint", "status"],
        )?;
        let active_users =
            registry.register_gauge("active_users_count", "Number of currently active users")?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                requests,
                active_users,
            }),
        })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn active_users(&self) -> &Gauge {
        &self.inner.active_users
    }

    /// Count one handled request in `http_requests_total`.
    pub fn record_request(&self, method: &str, endpoint: &str, status: u16) -> Result<()> {
        self.inner
            .requests
            .inc(&[method, endpoint, &status.to_string()])
    }
}
