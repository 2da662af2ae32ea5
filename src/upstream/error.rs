//! Upstream failure taxonomy.

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur while relaying a request upstream.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection could not be established (refused, DNS, connect timeout).
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// No response head within the configured deadline.
    #[error("upstream timed out after {0:?}")]
    Timeout(Duration),

    /// Connection established but the exchange failed.
    #[error("upstream transport error: {0}")]
    Transport(String),

    /// The outbound request could not be built.
    #[error("invalid upstream target: {0}")]
    InvalidTarget(String),
}

impl UpstreamError {
    /// Status returned to the client for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            UpstreamError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Unreachable(_) => "unreachable",
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::InvalidTarget(_) => "invalid_target",
        }
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
