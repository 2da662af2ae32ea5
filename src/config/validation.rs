//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - The upstream deadline must expire before the whole-request deadline
//! - Check the upstream URL is a plain HTTP origin
//! - Compile deployment-supplied signatures
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;
use crate::waf::RegexSignature;

/// A single semantic problem with the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("upstream.url '{url}' is invalid: {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    #[error("upstream.url scheme '{0}' is not supported (only http)")]
    UnsupportedScheme(String),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.upstream_secs ({upstream}) must be less than timeouts.request_secs ({request})")]
    UpstreamOutlivesRequest { upstream: u64, request: u64 },

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("waf signature '{name}' has an invalid pattern: {reason}")]
    InvalidSignature { name: String, reason: String },

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.upstream.url) {
        Ok(url) if url.scheme() != "http" => {
            errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string()));
        }
        Ok(url) if url.host_str().is_none() => {
            errors.push(ValidationError::InvalidUpstreamUrl {
                url: config.upstream.url.clone(),
                reason: "missing host".to_string(),
            });
        }
        Ok(url) if url.query().is_some() || url.fragment().is_some() => {
            errors.push(ValidationError::InvalidUpstreamUrl {
                url: config.upstream.url.clone(),
                reason: "query and fragment are not allowed".to_string(),
            });
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidUpstreamUrl {
            url: config.upstream.url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    let (upstream, request) = (config.timeouts.upstream_secs, config.timeouts.request_secs);
    if upstream > 0 && request > 0 && upstream >= request {
        errors.push(ValidationError::UpstreamOutlivesRequest { upstream, request });
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    for sig in &config.waf.extra_signatures {
        if let Err(e) = RegexSignature::new(sig.name.clone(), &sig.pattern) {
            errors.push(ValidationError::InvalidSignature {
                name: sig.name.clone(),
                reason: e.to_string(),
            });
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SignatureConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstream.url = "https://secure.example.com".into();
        config.timeouts.upstream_secs = 0;
        config.security.max_body_size = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidBindAddress("not-an-address".into()),
                ValidationError::UnsupportedScheme("https".into()),
                ValidationError::ZeroTimeout("upstream_secs"),
                ValidationError::ZeroBodyLimit,
            ]
        );
    }

    #[test]
    fn test_rejects_bad_signature_pattern() {
        let mut config = GatewayConfig::default();
        config.waf.extra_signatures.push(SignatureConfig {
            name: "broken".into(),
            pattern: "(unclosed".into(),
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ValidationError::InvalidSignature { name, .. } if name == "broken"
        ));
    }

    #[test]
    fn test_rejects_unparseable_upstream() {
        let mut config = GatewayConfig::default();
        config.upstream.url = "user-service:8000".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_rejects_upstream_deadline_not_below_request_deadline() {
        let mut config = GatewayConfig::default();
        config.timeouts.upstream_secs = 5;
        config.timeouts.request_secs = 1;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UpstreamOutlivesRequest { upstream: 5, request: 1 }]
        );

        config.timeouts.request_secs = 5;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_upstream_with_query_or_fragment() {
        for url in ["http://user-service:8000/api?x=1", "http://user-service:8000/api#frag"] {
            let mut config = GatewayConfig::default();
            config.upstream.url = url.into();

            let errors = validate_config(&config).unwrap_err();
            assert!(matches!(
                &errors[..],
                [ValidationError::InvalidUpstreamUrl { reason, .. }] if reason.contains("query")
            ));
        }
    }
}
