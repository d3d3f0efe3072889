//! Upstream target resolution.
//!
//! # Responsibilities
//! - Parse the configured upstream URL into ready-to-use URI components
//! - Reject malformed targets at startup, never per request
//!
//! # Design Decisions
//! - Cleartext http only; outbound TLS belongs to an external terminator,
//!   and cleartext keeps h2c prior-knowledge forwarding intact
//! - Components are pre-parsed so the per-request rewrite cannot fail on
//!   target data

use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;

/// Errors constructing the upstream target; all fatal at startup.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("invalid upstream URL `{url}`: {source}")]
    Url {
        url: String,
        source: url::ParseError,
    },
    #[error("unsupported upstream scheme `{0}` (cleartext http only)")]
    Scheme(String),
    #[error("upstream URL `{0}` has no host")]
    MissingHost(String),
    #[error("invalid upstream authority `{0}`")]
    Authority(String),
    #[error("invalid rewrite path `{0}`")]
    RewritePath(String),
}

/// Immutable description of the single upstream service.
///
/// Built once from validated configuration; shared read-only across all
/// request tasks.
#[derive(Debug, Clone)]
pub struct UpstreamTarget {
    authority: Authority,
    host_header: HeaderValue,
    rewrite_path: PathAndQuery,
}

impl UpstreamTarget {
    /// Parse the configured upstream into URI components.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, TargetError> {
        let url = Url::parse(&config.url).map_err(|source| TargetError::Url {
            url: config.url.clone(),
            source,
        })?;

        if url.scheme() != "http" {
            return Err(TargetError::Scheme(url.scheme().to_string()));
        }

        let host = url
            .host_str()
            .ok_or_else(|| TargetError::MissingHost(config.url.clone()))?;
        let authority_str = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let authority: Authority = authority_str
            .parse()
            .map_err(|_| TargetError::Authority(authority_str.clone()))?;
        let host_header = HeaderValue::from_str(&authority_str)
            .map_err(|_| TargetError::Authority(authority_str.clone()))?;

        if !config.rewrite_path.starts_with('/') {
            return Err(TargetError::RewritePath(config.rewrite_path.clone()));
        }
        let rewrite_path: PathAndQuery = config
            .rewrite_path
            .parse()
            .map_err(|_| TargetError::RewritePath(config.rewrite_path.clone()))?;

        Ok(Self {
            authority,
            host_header,
            rewrite_path,
        })
    }

    pub fn scheme(&self) -> Scheme {
        Scheme::HTTP
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Value the outbound `Host` header is replaced with.
    pub fn host_header(&self) -> &HeaderValue {
        &self.host_header
    }

    /// Fixed path every authorized request is rewritten to.
    pub fn rewrite_path(&self) -> &PathAndQuery {
        &self.rewrite_path
    }
}
