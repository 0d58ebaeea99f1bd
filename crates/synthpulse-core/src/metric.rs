//! Counter and gauge handles.
//!
//! Handles are cheap `Arc` clones handed out by [`crate::Registry`] at
//! registration time. Counter series are backed by `DashMap` keyed by the
//! concrete label-value tuple; the gauge is a single atomic cell. Every
//! mutation is atomic with respect to concurrent readers of the same series,
//! so handlers and the background updater never take a registry-wide lock.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{PulseError, Result};

/// Metric kind, as it appears on `# TYPE` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    /// String representation used in the text exposition.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

/// Escape a label value for the text exposition.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

#[derive(Debug)]
struct CounterInner {
    name: String,
    label_names: Vec<String>,
    series: DashMap<Vec<String>, AtomicU64>,
}

/// Monotonically non-decreasing metric, keyed by a label-value tuple.
///
/// The label schema is fixed at registration; updates must supply exactly
/// one value per declared label name, in schema order.
#[derive(Clone, Debug)]
pub struct Counter {
    inner: Arc<CounterInner>,
}

impl Counter {
    pub(crate) fn new(name: &str, label_names: &[&str]) -> Self {
        Self {
            inner: Arc::new(CounterInner {
                name: name.to_string(),
                label_names: label_names.iter().map(|s| s.to_string()).collect(),
                series: DashMap::new(),
            }),
        }
    }

    /// Metric name as registered.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Declared label names, in schema order.
    pub fn label_names(&self) -> &[String] {
        &self.inner.label_names
    }

    /// Increment by 1.
    pub fn inc(&self, label_values: &[&str]) -> Result<()> {
        self.add(label_values, 1)
    }

    /// Increment by an arbitrary amount. A previously unseen label tuple is
    /// created at zero first.
    pub fn add(&self, label_values: &[&str], v: u64) -> Result<()> {
        if label_values.len() != self.inner.label_names.len() {
            return Err(PulseError::LabelArity {
                metric: self.inner.name.clone(),
                expected: self.inner.label_names.len(),
                got: label_values.len(),
            });
        }

        let key: Vec<String> = label_values.iter().map(|s| s.to_string()).collect();
        let cell = self.inner.series.entry(key).or_insert_with(|| AtomicU64::new(0));
        cell.fetch_add(v, Ordering::Relaxed);
        Ok(())
    }

    /// Current value for an exact label tuple (0 if unseen). Test/debug aid.
    pub fn get(&self, label_values: &[&str]) -> u64 {
        let key: Vec<String> = label_values.iter().map(|s| s.to_string()).collect();
        self.inner
            .series
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render one value line per observed series, sorted by label tuple so
    /// the same snapshot always prints the same text.
    pub(crate) fn render(&self, out: &mut String) {
        let mut rows: Vec<(Vec<String>, u64)> = self
            .inner
            .series
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();

        for (values, v) in rows {
            if values.is_empty() {
                let _ = writeln!(out, "{} {}", self.inner.name, v);
                continue;
            }
            let label_str = self
                .inner
                .label_names
                .iter()
                .zip(values.iter())
                .map(|(k, val)| format!("{}=\"{}\"", k, escape_label(val)))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(out, "{}{{{}}} {}", self.inner.name, label_str, v);
        }
    }
}

#[derive(Debug)]
struct GaugeInner {
    name: String,
    value: AtomicI64,
}

/// Single arbitrary-valued metric, not required to be monotonic.
///
/// Starts at 0; `set` overwrites unconditionally.
#[derive(Clone, Debug)]
pub struct Gauge {
    inner: Arc<GaugeInner>,
}

impl Gauge {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            inner: Arc::new(GaugeInner {
                name: name.to_string(),
                value: AtomicI64::new(0),
            }),
        }
    }

    /// Metric name as registered.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Overwrite the current value.
    pub fn set(&self, v: i64) {
        self.inner.value.store(v, Ordering::Relaxed);
    }

    /// Read the current value.
    pub fn get(&self) -> i64 {
        self.inner.value.load(Ordering::Relaxed)
    }

    pub(crate) fn render(&self, out: &mut String) {
        let _ = writeln!(out, "{} {}", self.inner.name, self.get());
    }
}
