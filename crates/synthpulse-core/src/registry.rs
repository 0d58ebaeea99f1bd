//! Metric registry and Prometheus text exposition.
//!
//! The registry owns every metric definition for the process lifetime:
//! registration happens once at startup and nothing is ever deleted or
//! reset. Value updates go through the handles in [`crate::metric`] and
//! never touch the registry lock.

use std::fmt::Write;
use std::sync::RwLock;

use crate::error::{PulseError, Result};
use crate::metric::{Counter, Gauge, MetricKind};

/// Escape help text for `# HELP` lines.
fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

enum Slot {
    Counter(Counter),
    Gauge(Gauge),
}

impl Slot {
    fn name(&self) -> &str {
        match self {
            Slot::Counter(c) => c.name(),
            Slot::Gauge(g) => g.name(),
        }
    }

    fn kind(&self) -> MetricKind {
        match self {
            Slot::Counter(_) => MetricKind::Counter,
            Slot::Gauge(_) => MetricKind::Gauge,
        }
    }

    fn render(&self, out: &mut String) {
        match self {
            Slot::Counter(c) => c.render(out),
            Slot::Gauge(g) => g.render(out),
        }
    }
}

struct Entry {
    help: String,
    slot: Slot,
}

/// Process-wide metric registry.
///
/// Construct one per process (or per test) and pass it explicitly to every
/// component that records or exports; there is no global instance.
#[derive(Default)]
pub struct Registry {
    metrics: RwLock<Vec<Entry>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a counter with a fixed label schema.
    ///
    /// Fails with [`PulseError::DuplicateMetric`] if `name` is already taken
    /// by a metric of either kind; the existing registration is unaffected.
    pub fn register_counter(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<Counter> {
        let counter = Counter::new(name, label_names);
        self.insert(help, Slot::Counter(counter.clone()))?;
        Ok(counter)
    }

    /// Register an unlabeled gauge. Same uniqueness rule as counters.
    pub fn register_gauge(&self, name: &str, help: &str) -> Result<Gauge> {
        let gauge = Gauge::new(name);
        self.insert(help, Slot::Gauge(gauge.clone()))?;
        Ok(gauge)
    }

    fn insert(&self, help: &str, slot: Slot) -> Result<()> {
        let mut metrics = self
            .metrics
            .write()
            .map_err(|_| PulseError::Internal("metrics registry lock poisoned".into()))?;

        if metrics.iter().any(|e| e.slot.name() == slot.name()) {
            return Err(PulseError::DuplicateMetric(slot.name().to_string()));
        }

        metrics.push(Entry {
            help: help.to_string(),
            slot,
        });
        Ok(())
    }

    /// Render every registered metric in Prometheus text format 0.0.4.
    ///
    /// Metrics print in registration order; `# HELP` and `# TYPE` lines
    /// always print, value lines only for observed series (a gauge always
    /// has one). An empty registry renders an empty string. Never fails:
    /// a poisoned lock degrades to empty output instead of panicking.
    pub fn export(&self) -> String {
        let Ok(metrics) = self.metrics.read() else {
            return String::new();
        };

        let mut out = String::with_capacity(1024);
        for entry in metrics.iter() {
            let name = entry.slot.name();
            let _ = writeln!(out, "# HELP {} {}", name, escape_help(&entry.help));
            let _ = writeln!(out, "# TYPE {} {}", name, entry.slot.kind().as_str());
            entry.slot.render(&mut out);
        }
        out
    }
}
