//! Minimal upstream for local runs of the gateway.
//!
//! `GET /health` answers `ok`; every other request gets a JSON placeholder.

use axum::{
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use clap::Parser;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mock-upstream", about = "Placeholder upstream service", long_about = None)]
struct Cli {
    /// Listen address.
    #[arg(short, long, env = "MOCK_UPSTREAM_LISTEN", default_value = "0.0.0.0:8000")]
    listen: String,
}

async fn health() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "ok")
}

async fn placeholder() -> impl IntoResponse {
    Json(json!({ "message": "user-service placeholder" }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_upstream=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let app = Router::new()
        .route("/health", get(health))
        .fallback(placeholder);

    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    tracing::info!(address = %listener.local_addr()?, "Mock upstream listening");
    axum::serve(listener, app).await?;
    Ok(())
}
