//! Top-level facade crate for synthpulse.
//!
//! Re-exports the metric core and the server library so users can depend on a single crate.

pub mod core {
    pub use synthpulse_core::*;
}

pub mod server {
    pub use synthpulse_server::*;
}
