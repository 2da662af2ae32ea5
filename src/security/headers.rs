//! Header sanitization.
//!
//! # Responsibilities
//! - Strip the inbound Host header before forwarding (the client sets its own)
//! - Strip hop-by-hop and framing headers in both directions
//! - Strip any header listed in a `Connection` header
//!
//! # Design Decisions
//! - Matching is case-insensitive (`http` lowercases names on parse)
//! - Content-Length is never copied: the body writer recomputes it
//! - Everything else passes through untouched and in order

use axum::http::header::{self, HeaderMap, HeaderName};

/// Which leg of the proxy a header set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Client → upstream.
    Request,
    /// Upstream → client.
    Response,
}

/// Headers that only describe a single transport hop (RFC 7230 §6.1),
/// plus the framing headers the proxy recomputes.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "content-length",
];

/// Returns a copy of `headers` with hop-by-hop and framing headers removed.
pub fn sanitize(headers: &HeaderMap, direction: Direction) -> HeaderMap {
    let listed = connection_tokens(headers);

    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        if is_stripped(name, direction) || listed.iter().any(|t| t == name) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

fn is_stripped(name: &HeaderName, direction: Direction) -> bool {
    if HOP_BY_HOP.contains(&name.as_str()) {
        return true;
    }
    match direction {
        Direction::Request => name == header::HOST,
        Direction::Response => name == header::CONTENT_ENCODING,
    }
}

/// Header names listed in `Connection: a, b` are hop-by-hop too.
fn connection_tokens(headers: &HeaderMap) -> Vec<HeaderName> {
    headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect()
}
