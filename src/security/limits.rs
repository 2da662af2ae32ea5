//! Request size limits.
//!
//! # Responsibilities
//! - Buffer the inbound body up to the configured maximum
//! - Distinguish "too large" (413) from "could not be read" (400)
//!
//! # Design Decisions
//! - Declared Content-Length checked before reading (early rejection)
//! - The body is buffered because it must be inspected before forwarding

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap};
use http_body_util::LengthLimitError;

/// Why an inbound body could not be captured.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    Unreadable(String),
}

/// Read the full body, refusing anything larger than `limit` bytes.
pub async fn read_body(headers: &HeaderMap, body: Body, limit: usize) -> Result<Bytes, BodyError> {
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<usize>().ok());
    if matches!(declared, Some(len) if len > limit) {
        return Err(BodyError::TooLarge { limit });
    }

    axum::body::to_bytes(body, limit).await.map_err(|e| {
        if is_length_limit(&e) {
            BodyError::TooLarge { limit }
        } else {
            BodyError::Unreadable(e.to_string())
        }
    })
}

fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}
