//! Upstream HTTP client.
//!
//! # Responsibilities
//! - Send one request to the upstream and hand back its response head + streaming body
//! - Classify failures (connect vs. transport)
//!
//! # Design Decisions
//! - `UpstreamClient` trait between forwarder and transport
//! - hyper-util pooled client with keep-alive
//! - Redirects are never followed

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};

use crate::upstream::error::{UpstreamError, UpstreamResult};

/// Anything that can carry a single request to the upstream.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn send(&self, request: Request<Body>) -> UpstreamResult<Response<Body>>;
}

/// Plain-HTTP client backed by hyper.
#[derive(Clone)]
pub struct HyperClient {
    client: Client<HttpConnector, Body>,
}

impl HyperClient {
    /// Create a client whose TCP connects give up after `connect_timeout`.
    pub fn new(connect_timeout: Duration) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(connect_timeout));
        connector.set_nodelay(true);

        let client = Client::builder(TokioExecutor::new()).build(connector);
        Self { client }
    }
}

#[async_trait]
impl UpstreamClient for HyperClient {
    async fn send(&self, request: Request<Body>) -> UpstreamResult<Response<Body>> {
        match self.client.request(request).await {
            Ok(response) => Ok(response.map(Body::new)),
            Err(e) if e.is_connect() => Err(UpstreamError::Unreachable(describe(&e))),
            Err(e) => Err(UpstreamError::Transport(describe(&e))),
        }
    }
}

/// hyper-util's top-level message is terse; append the root cause.
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
