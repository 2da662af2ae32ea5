//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (buffer body up to the configured maximum)
//!     → [waf inspection]
//!     → headers.rs (strip Host + hop-by-hop before forwarding)
//!
//! Upstream response:
//!     → headers.rs (strip framing headers before relaying)
//! ```
//!
//! # Design Decisions
//! - Fail closed: oversized or unreadable bodies are never forwarded
//! - No trust in client-supplied framing headers

pub mod headers;
pub mod limits;

pub use headers::{sanitize, Direction};
pub use limits::{read_body, BodyError};
