//! Request inspection.
//!
//! # Responsibilities
//! - Evaluate the raw query string and raw body against the signature set
//! - Produce exactly one [`Verdict`] per request
//!
//! # Design Decisions
//! - Pure function of (query, body, signature set); nothing is cached
//! - No decoding or normalization before matching
//! - Query string is scanned before the body; first hit wins

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::waf::signatures::SignatureSet;

/// The request surface a signature was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    QueryString,
    Body,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::QueryString => "query",
            Surface::Body => "body",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a request was denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Name of the first matching signature.
    pub signature: String,
    /// Where it matched.
    pub surface: Surface,
}

/// The inspector's decision for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny(Detection),
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allow)
    }
}

/// Evaluates requests against a shared, immutable signature set.
#[derive(Debug, Clone)]
pub struct Inspector {
    signatures: Arc<SignatureSet>,
}

impl Inspector {
    pub fn new(signatures: Arc<SignatureSet>) -> Self {
        Self { signatures }
    }

    /// Inspect the raw query string and body.
    ///
    /// Bodies that are not valid UTF-8 are decoded lossily; the
    /// replacement characters never match a signature, the rest is still inspected.
    pub fn inspect(&self, query: &str, body: &[u8]) -> Verdict {
        if let Some(detection) = self.scan(query, Surface::QueryString) {
            return Verdict::Deny(detection);
        }

        let body: Cow<'_, str> = String::from_utf8_lossy(body);
        if let Some(detection) = self.scan(&body, Surface::Body) {
            return Verdict::Deny(detection);
        }

        Verdict::Allow
    }

    fn scan(&self, text: &str, surface: Surface) -> Option<Detection> {
        // An empty surface is vacuously safe.
        if text.trim().is_empty() {
            return None;
        }
        self.signatures.first_match(text).map(|sig| Detection {
            signature: sig.name().to_string(),
            surface,
        })
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(Arc::new(SignatureSet::builtin()))
    }
}
