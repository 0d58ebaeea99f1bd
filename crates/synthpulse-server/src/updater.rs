//! Background updater driving the simulated `active_users_count` gauge.
//!
//! Each iteration runs one tick and then sleeps for the full interval. The
//! stop flag is only observed between iterations, so a stop request lets an
//! in-flight sleep finish instead of cancelling it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;

use synthpulse_core::error::Result;
use synthpulse_core::Gauge;

use crate::config::UpdaterSection;

pub struct MetricsUpdater {
    running: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl MetricsUpdater {
    /// Spawn an update loop that calls `tick` every `interval`.
    ///
    /// A failed tick is logged and the loop keeps going.
    pub fn start<F>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Result<()> + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let task = tokio::spawn(async move {
            while flag.load(Ordering::Relaxed) {
                if let Err(e) = tick() {
                    tracing::warn!(error = %e, "metrics update tick failed");
                }
                tokio::time::sleep(interval).await;
            }
            tracing::debug!("metrics updater loop exited");
        });

        Self { running, task }
    }

    /// Production loop: every tick sets `gauge` to a uniform draw from
    /// `[min_active_users, max_active_users]`.
    pub fn active_users(cfg: &UpdaterSection, gauge: Gauge) -> Self {
        let mut draw = active_users_source(cfg);

        Self::start(Duration::from_millis(cfg.interval_ms), move || {
            gauge.set(draw());
            Ok(())
        })
    }

    /// Request the loop to exit at its next iteration boundary.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Stop and wait for the loop to finish its final iteration.
    pub async fn shutdown(self) {
        self.stop();
        let _ = self.task.await;
    }
}

/// Draw source behind [`MetricsUpdater::active_users`]: uniform over the
/// configured closed range, reproducible when `seed` is set.
pub fn active_users_source(cfg: &UpdaterSection) -> impl FnMut() -> i64 + Send {
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let (lo, hi) = (cfg.min_active_users, cfg.max_active_users);
    move || rng.random_range(lo..=hi)
}
