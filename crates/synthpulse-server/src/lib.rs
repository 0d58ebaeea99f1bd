//! synthpulse server library entry.
//!
//! This crate wires the config layer, shared state, HTTP routes, and the
//! background gauge updater into a runnable demo service. It is intended
//! to be consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod demo;
pub mod ops;
pub mod router;
pub mod updater;
