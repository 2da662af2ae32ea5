//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gateway and middleware produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through every log line of a request
//! - Signature names appear in logs and metrics only, never in responses

pub mod logging;
pub mod metrics;
