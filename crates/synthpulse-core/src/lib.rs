//! synthpulse core: metric types, registry, and text exposition.
//!
//! This crate defines the in-memory metrics model shared by the server and
//! any embedding code: labeled counters, gauges, a registry that owns their
//! definitions, and the Prometheus text rendering of a snapshot. It carries
//! no runtime or HTTP dependencies.
//!
//! Panics, `unwrap`, and `expect` are compile-denied; every fallible path
//! surfaces as [`PulseError`].

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;
pub mod registry;

pub use error::{PulseError, Result};
pub use metric::{Counter, Gauge, MetricKind};
pub use registry::Registry;
