//! Per-request gateway pipeline.
//!
//! # State Machine
//! ```text
//! Received → Inspecting → Denied                        (403, terminal)
//!                       → Forwarding → Relaying         (upstream status, terminal)
//!                                    → UpstreamFailed   (502/504, terminal)
//! ```
//!
//! # Design Decisions
//! - Stateless across requests; the only shared data is read-only
//! - Inspection runs on the raw query and raw body, before anything is rewritten
//! - A request only reaches the upstream after an Allow verdict

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use thiserror::Error;

use crate::config::GatewayConfig;
use crate::http::request::request_id;
use crate::http::response;
use crate::observability::metrics;
use crate::security::headers::{sanitize, Direction};
use crate::security::limits::read_body;
use crate::upstream::{Forwarder, ProxiedRequest, UpstreamClient, UpstreamError};
use crate::waf::{Inspector, SignatureSet, Verdict};

/// Errors building a gateway from configuration.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid signature pattern: {0}")]
    Signature(#[from] regex::Error),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Inspector + forwarder, shared by every request.
pub struct Gateway {
    inspector: Inspector,
    forwarder: Forwarder,
    max_body_size: usize,
}

impl Gateway {
    pub fn new(inspector: Inspector, forwarder: Forwarder, max_body_size: usize) -> Self {
        Self {
            inspector,
            forwarder,
            max_body_size,
        }
    }

    /// Build the signature set and forwarder described by `config`.
    pub fn from_config(
        config: &GatewayConfig,
        client: Arc<dyn UpstreamClient>,
    ) -> Result<Self, GatewayError> {
        let signatures = SignatureSet::from_config(&config.waf)?;
        tracing::info!(signatures = signatures.len(), "Signature set loaded");

        let forwarder = Forwarder::new(
            &config.upstream.url,
            client,
            Duration::from_secs(config.timeouts.upstream_secs),
        )?;

        Ok(Self::new(
            Inspector::new(Arc::new(signatures)),
            forwarder,
            config.security.max_body_size,
        ))
    }

    /// Handle one inbound request. Always yields exactly one response.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let start = Instant::now();
        let (parts, body) = request.into_parts();
        let request_id = request_id(&parts.headers).to_string();
        let method = parts.method.to_string();

        let body = match read_body(&parts.headers, body, self.max_body_size).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Rejecting request body");
                let response = response::body_rejected(&e);
                metrics::record_request(&method, response.status().as_u16(), "rejected", start);
                return response;
            }
        };

        let query = parts.uri.query().unwrap_or("");
        if let Verdict::Deny(detection) = self.inspector.inspect(query, &body) {
            tracing::warn!(
                request_id = %request_id,
                method = %parts.method,
                path = %parts.uri.path(),
                signature = %detection.signature,
                surface = %detection.surface,
                "Request blocked"
            );
            metrics::record_detection(&detection.signature, detection.surface.as_str());
            let response = response::denied();
            metrics::record_request(&method, response.status().as_u16(), "denied", start);
            return response;
        }

        let proxied = ProxiedRequest {
            method: parts.method,
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(str::to_string),
            headers: parts.headers,
            body,
        };

        tracing::debug!(
            request_id = %request_id,
            upstream = %self.forwarder.authority(),
            path = %proxied.path,
            "Forwarding request"
        );

        match self.forwarder.forward(proxied).await {
            Ok(upstream) => {
                let headers = sanitize(&upstream.headers, Direction::Response);
                metrics::record_request(&method, upstream.status.as_u16(), "relayed", start);
                response::relay(upstream.status, headers, upstream.body)
            }
            Err(e) => {
                tracing::error!(request_id = %request_id, error = %e, "Upstream error");
                metrics::record_upstream_error(e.kind());
                let response = response::upstream_failure(&e);
                metrics::record_request(&method, response.status().as_u16(), "upstream_failed", start);
                response
            }
        }
    }
}
