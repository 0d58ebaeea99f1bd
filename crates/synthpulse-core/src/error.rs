//! Shared error type across synthpulse crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, PulseError>;

/// Unified error type used by the core registry and the server.
#[derive(Debug, Error)]
pub enum PulseError {
    /// A metric name was registered twice. Registration happens once at
    /// startup, so this is fatal to the caller.
    #[error("duplicate metric: {0}")]
    DuplicateMetric(String),
    /// A counter was updated with the wrong number of label values.
    #[error("label arity mismatch for {metric}: expected {expected}, got {got}")]
    LabelArity {
        metric: String,
        expected: usize,
        got: usize,
    },
    /// Config failed strict parsing or validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}
