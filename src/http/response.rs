//! Response shaping for locally terminated requests.
//!
//! # Responsibilities
//! - Build protocol-correct failure responses (classic 401 vs. gRPC
//!   status/trailer metadata)
//! - Build the synthetic gRPC success surface for the stubbed RPC path
//! - Map upstream transport failures to a 5xx response
//!
//! # Design Decisions
//! - gRPC responses fix the header/status-metadata surface only; no message
//!   framing is emitted (RPC body relay is a stub boundary)
//! - gRPC rejections also carry transport status 401 so non-RPC-aware
//!   intermediaries see the failure

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;

use crate::http::protocol::GRPC_CONTENT_TYPE;

/// gRPC status metadata entry.
pub const GRPC_STATUS: &str = "grpc-status";
/// gRPC human-readable message entry.
pub const GRPC_MESSAGE: &str = "grpc-message";

const GRPC_STATUS_OK: &str = "0";
const GRPC_STATUS_UNAUTHENTICATED: &str = "16";

/// Classic rejection: plain 401 with a text body.
pub fn http_unauthorized() -> Response {
    let mut response = Response::new(Body::from("Unauthorized"));
    *response.status_mut() = StatusCode::UNAUTHORIZED;
    response
}

/// RPC rejection: transport 401 plus gRPC "unauthenticated" metadata.
pub fn rpc_unauthenticated() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::UNAUTHORIZED;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(GRPC_CONTENT_TYPE));
    headers.insert(GRPC_STATUS, HeaderValue::from_static(GRPC_STATUS_UNAUTHENTICATED));
    headers.insert(GRPC_MESSAGE, HeaderValue::from_static("Invalid authentication"));
    response
}

/// RPC acceptance: synthetic success, no upstream relay performed.
pub fn rpc_ok() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(GRPC_CONTENT_TYPE));
    headers.insert(GRPC_STATUS, HeaderValue::from_static(GRPC_STATUS_OK));
    response
}

/// Upstream transport failure on the forward path.
pub fn bad_gateway() -> Response {
    let mut response = Response::new(Body::from("Upstream request failed"));
    *response.status_mut() = StatusCode::BAD_GATEWAY;
    response
}
