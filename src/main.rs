//! WAF gateway (v1)
//!
//! An inline gateway built with Tokio and Axum that blocks SQL-injection
//! attempts before they reach the upstream service.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                    WAF GATEWAY                    │
//!                        │                                                   │
//!     Client Request     │  ┌─────────┐    ┌───────────┐    ┌────────────┐  │
//!     ───────────────────┼─▶│  http   │───▶│    waf    │───▶│  upstream  │──┼──▶ Upstream
//!                        │  │ server  │    │ inspector │    │ forwarder  │  │    Service
//!                        │  └─────────┘    └─────┬─────┘    └─────┬──────┘  │
//!                        │                       │ deny           │         │
//!                        │                       ▼                ▼         │
//!     Client Response    │               ┌─────────────┐   ┌────────────┐   │
//!     ◀──────────────────┼───────────────│ 403 denial  │   │  security  │   │
//!     ◀──────────────────┼───────────────┴─────────────┴───│  headers   │◀──┼─── Response
//!                        │                                 └────────────┘   │
//!                        └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use waf_gateway::config::{read_config, validate_config, ConfigError, GatewayConfig};
use waf_gateway::lifecycle::startup;
use waf_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "waf-gateway", version)]
#[command(about = "Inline gateway that blocks SQL injection before it reaches the upstream", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "WAF_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides `listener.bind_address`.
    #[arg(short, long, env = "WAF_LISTEN")]
    listen: Option<String>,

    /// Upstream base URL, overrides `upstream.url`.
    #[arg(short, long, env = "WAF_UPSTREAM")]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(listen) = cli.listen {
        config.listener.bind_address = listen;
    }
    if let Some(upstream) = cli.upstream {
        config.upstream.url = upstream;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        max_body_size = config.security.max_body_size,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
