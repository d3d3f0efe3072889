//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject malformed upstream targets at startup, not per request
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::header::HeaderName;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidUpstreamUrl(String),
    UnsupportedUpstreamScheme(String),
    MissingUpstreamHost(String),
    InvalidRewritePath(String),
    InvalidIdentityHeader(String),
    EmptyCookieName,
    ZeroTimeout(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "invalid bind address `{}`", addr)
            }
            ValidationError::InvalidUpstreamUrl(url) => {
                write!(f, "invalid upstream URL `{}`", url)
            }
            ValidationError::UnsupportedUpstreamScheme(scheme) => {
                write!(f, "unsupported upstream scheme `{}` (cleartext http only)", scheme)
            }
            ValidationError::MissingUpstreamHost(url) => {
                write!(f, "upstream URL `{}` has no host", url)
            }
            ValidationError::InvalidRewritePath(path) => {
                write!(f, "rewrite path `{}` must start with `/`", path)
            }
            ValidationError::InvalidIdentityHeader(name) => {
                write!(f, "invalid identity header name `{}`", name)
            }
            ValidationError::EmptyCookieName => write!(f, "auth cookie name must not be empty"),
            ValidationError::ZeroTimeout(which) => {
                write!(f, "timeout `{}` must be greater than zero", which)
            }
        }
    }
}

/// Validate a configuration, collecting every failure.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.upstream.url) {
        Ok(url) => {
            if url.scheme() != "http" {
                errors.push(ValidationError::UnsupportedUpstreamScheme(
                    url.scheme().to_string(),
                ));
            }
            if url.host_str().is_none() {
                errors.push(ValidationError::MissingUpstreamHost(
                    config.upstream.url.clone(),
                ));
            }
        }
        Err(_) => {
            errors.push(ValidationError::InvalidUpstreamUrl(
                config.upstream.url.clone(),
            ));
        }
    }

    if !config.upstream.rewrite_path.starts_with('/') {
        errors.push(ValidationError::InvalidRewritePath(
            config.upstream.rewrite_path.clone(),
        ));
    }

    if config.auth.cookie_name.is_empty() {
        errors.push(ValidationError::EmptyCookieName);
    }

    if HeaderName::from_bytes(config.auth.identity_header.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidIdentityHeader(
            config.auth.identity_header.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.timeouts.validate_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("validate_secs"));
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

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn https_upstream_is_rejected() {
        let mut config = GatewayConfig::default();
        config.upstream.url = "https://httpbin.org".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .contains(&ValidationError::UnsupportedUpstreamScheme("https".to_string())));
    }

    #[test]
    fn garbage_upstream_url_is_rejected() {
        let mut config = GatewayConfig::default();
        config.upstream.url = "not a url".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidUpstreamUrl("not a url".to_string())));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "nonsense".to_string();
        config.upstream.rewrite_path = "anything".to_string();
        config.timeouts.validate_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn relative_rewrite_path_is_rejected() {
        let mut config = GatewayConfig::default();
        config.upstream.rewrite_path = "anything".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .contains(&ValidationError::InvalidRewritePath("anything".to_string())));
    }
}
