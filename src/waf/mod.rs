//! Inspection subsystem.
//!
//! # Data Flow
//! ```text
//! Raw query string + raw body
//!     → inspector.rs (scan each surface)
//!     → signatures.rs (ordered signature set)
//!     → signature.rs (regex / literal predicates)
//!     → Verdict: Allow | Deny(signature, surface)
//! ```
//!
//! # Design Decisions
//! - Signature set compiled at startup, immutable at runtime
//! - Shared via Arc, no locking on the hot path
//! - Union semantics: any single hit denies the whole request

pub mod inspector;
pub mod signature;
pub mod signatures;

pub use inspector::{Detection, Inspector, Surface, Verdict};
pub use signature::{LiteralSignature, RegexSignature, Signature};
pub use signatures::SignatureSet;
