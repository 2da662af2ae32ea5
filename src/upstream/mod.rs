//! Upstream subsystem.
//!
//! # Data Flow
//! ```text
//! Allowed request
//!     → forwarder.rs (rebuild URI against the upstream origin, strip Host)
//!     → client.rs (send via hyper, classify failures)
//!     → ProxiedResponse (status, headers, streaming body)
//! ```

pub mod client;
pub mod error;
pub mod forwarder;

pub use client::{HyperClient, UpstreamClient};
pub use error::{UpstreamError, UpstreamResult};
pub use forwarder::{Forwarder, ProxiedRequest, ProxiedResponse};
