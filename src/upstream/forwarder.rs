//! Upstream forwarding.
//!
//! # Responsibilities
//! - Rebuild an allowed request against the single configured upstream
//! - Send it with a bounded deadline
//! - Hand back the upstream's status, headers and streaming body
//!
//! # Design Decisions
//! - Target path = upstream base path + inbound path; raw query carried verbatim
//! - Body bytes forwarded unchanged, never re-serialized
//! - One call per request: no retry, no failover
//! - The relayed body shares the upstream deadline as an idle limit between frames,
//!   so a stalled upstream aborts the client connection instead of holding it

use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode, Uri};
use tower_http::timeout::TimeoutBody;
use url::Url;

use crate::resilience::with_deadline;
use crate::security::headers::{sanitize, Direction};
use crate::upstream::client::UpstreamClient;
use crate::upstream::error::{UpstreamError, UpstreamResult};

/// An allowed request, owned by the forwarder for one upstream call.
#[derive(Debug)]
pub struct ProxiedRequest {
    pub method: Method,
    /// Inbound path, always starting with `/`.
    pub path: String,
    /// Raw query string, without the leading `?`.
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// The upstream's answer, before header sanitization.
#[derive(Debug)]
pub struct ProxiedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Body,
}

/// Relays requests to a fixed upstream origin.
pub struct Forwarder {
    authority: String,
    base_path: String,
    client: Arc<dyn UpstreamClient>,
    timeout: Duration,
}

impl Forwarder {
    /// Create a forwarder for `upstream_url` (e.g. `http://user-service:8000/api`).
    pub fn new(
        upstream_url: &str,
        client: Arc<dyn UpstreamClient>,
        timeout: Duration,
    ) -> UpstreamResult<Self> {
        let url = Url::parse(upstream_url)
            .map_err(|e| UpstreamError::InvalidTarget(format!("{}: {}", upstream_url, e)))?;
        if url.scheme() != "http" {
            return Err(UpstreamError::InvalidTarget(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(UpstreamError::InvalidTarget(format!(
                "{}: query and fragment are not allowed",
                upstream_url
            )));
        }
        let host = url
            .host_str()
            .ok_or_else(|| UpstreamError::InvalidTarget(format!("{}: missing host", upstream_url)))?;
        let port = url.port_or_known_default().unwrap_or(80);

        Ok(Self {
            authority: format!("{}:{}", host, port),
            base_path: url.path().trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    /// Absolute upstream URI for an inbound path and raw query.
    pub fn target_uri(&self, path: &str, query: Option<&str>) -> UpstreamResult<Uri> {
        let mut target = String::with_capacity(self.base_path.len() + path.len() + 1);
        target.push_str(&self.base_path);
        target.push_str(path);
        if target.is_empty() {
            target.push('/');
        }
        if let Some(query) = query {
            target.push('?');
            target.push_str(query);
        }

        Uri::builder()
            .scheme("http")
            .authority(self.authority.as_str())
            .path_and_query(target)
            .build()
            .map_err(|e| UpstreamError::InvalidTarget(e.to_string()))
    }

    /// Send the request upstream and return its raw response.
    pub async fn forward(&self, request: ProxiedRequest) -> UpstreamResult<ProxiedResponse> {
        let uri = self.target_uri(&request.path, request.query.as_deref())?;

        let mut headers = sanitize(&request.headers, Direction::Request);
        // Content-Encoding is dropped on the way back, so ask for an unencoded body.
        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("identity"));

        let mut outbound = Request::builder()
            .method(request.method)
            .uri(uri)
            .body(Body::from(request.body))
            .map_err(|e| UpstreamError::InvalidTarget(e.to_string()))?;
        *outbound.headers_mut() = headers;

        let response = with_deadline(self.timeout, self.client.send(outbound)).await?;
        let (parts, body) = response.into_parts();

        Ok(ProxiedResponse {
            status: parts.status,
            headers: parts.headers,
            body: Body::new(TimeoutBody::new(self.timeout, body)),
        })
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }
}
