//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → command-line overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, read_config, ConfigError};
pub use schema::GatewayConfig;
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, SecurityConfig, SignatureConfig,
    TimeoutConfig, UpstreamConfig, WafConfig,
};
pub use validation::{validate_config, ValidationError};
