//! Inline SQL-injection filtering gateway.
//!
//! Every inbound request is inspected against a fixed signature set and
//! then either denied with a 403 or relayed to a single upstream service.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;
pub mod upstream;
pub mod waf;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use waf::{Inspector, SignatureSet, Verdict};
