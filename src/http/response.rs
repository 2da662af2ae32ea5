//! Response construction.
//!
//! # Responsibilities
//! - Fixed denial page for blocked requests
//! - Map upstream and body failures to status codes
//! - Assemble the relayed upstream response
//!
//! # Design Decisions
//! - The denial never names the signature that fired
//! - Upstream timeouts result in 504 Gateway Timeout, other upstream failures in 502
//! - Relayed bodies stream through; hyper computes the framing

use axum::body::Body;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::security::limits::BodyError;
use crate::upstream::error::UpstreamError;

/// Body of the 403 page.
pub const DENIAL_BODY: &str =
    "<html><body><h1>Access denied</h1><p>Request blocked by WAF</p></body></html>";

/// 403 returned for every denied request.
pub fn denied() -> Response {
    (
        StatusCode::FORBIDDEN,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        DENIAL_BODY,
    )
        .into_response()
}

/// 502/504 for a failed upstream call.
pub fn upstream_failure(err: &UpstreamError) -> Response {
    let message = match err {
        UpstreamError::Timeout(_) => "Upstream request timed out",
        _ => "Upstream request failed",
    };
    (err.status_code(), message).into_response()
}

/// 413/400 for a body that could not be captured.
pub fn body_rejected(err: &BodyError) -> Response {
    match err {
        BodyError::TooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large").into_response(),
        BodyError::Unreadable(_) => (StatusCode::BAD_REQUEST, "Malformed request body").into_response(),
    }
}

/// Relay an upstream response with already-sanitized headers.
pub fn relay(status: StatusCode, headers: HeaderMap, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
