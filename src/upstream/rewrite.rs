//! Request rewriting for the authorized forward path.
//!
//! # Responsibilities
//! - Substitute the outbound host with the fixed upstream host
//! - Rewrite the request path to the upstream inspection endpoint
//! - Inject the identity-propagation header with the resolved principal
//!
//! # Design Decisions
//! - Mutates the request in place; body and remaining headers pass through
//! - The original HTTP version is preserved so classic-over-h2 traffic goes
//!   upstream as h2c prior knowledge

use axum::body::Body;
use axum::http::header::HeaderName;
use axum::http::{header, HeaderValue, Request, Uri};
use thiserror::Error;

use crate::upstream::target::UpstreamTarget;

/// Errors preparing an authorized request for upstream delivery.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("principal `{0}` is not a valid header value")]
    Principal(String),
}

/// Rewrite an authorized request in place for upstream delivery.
pub fn rewrite_request(
    request: &mut Request<Body>,
    target: &UpstreamTarget,
    identity_header: &HeaderName,
    principal: &str,
) -> Result<(), RewriteError> {
    let original = request.uri().clone();
    let mut parts = original.clone().into_parts();
    parts.scheme = Some(target.scheme());
    parts.authority = Some(target.authority().clone());
    parts.path_and_query = Some(target.rewrite_path().clone());
    // All three components were validated at startup, so reassembly holds.
    *request.uri_mut() = Uri::from_parts(parts).unwrap_or(original);

    let principal_value = HeaderValue::from_str(principal)
        .map_err(|_| RewriteError::Principal(principal.to_string()))?;

    let headers = request.headers_mut();
    headers.insert(header::HOST, target.host_header().clone());
    headers.insert(identity_header.clone(), principal_value);

    Ok(())
}
