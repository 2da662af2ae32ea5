//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (enforce upstream deadline)
//!     → On failure: surfaced to the gateway as 502/504
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream call has a deadline
//! - No retries; a failed upstream call fails the request

pub mod timeouts;

pub use timeouts::with_deadline;
