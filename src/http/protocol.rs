//! Protocol classification.
//!
//! # Responsibilities
//! - Decide, per inbound request, whether it is framed-RPC or classic HTTP
//! - Classify exactly once, before credential extraction
//!
//! # Design Decisions
//! - FramedRpc requires HTTP/2 AND the gRPC content-type marker; everything
//!   else is ClassicHttp (deterministic fallback, never an error)
//! - Marker match is a case-sensitive substring test, mirroring how gRPC
//!   servers recognize `application/grpc+proto` and friends
//! - Pure function of the request line and headers, no side effects

use axum::http::{header, HeaderMap, Version};

/// Content-type marker identifying framed RPC traffic.
pub const GRPC_CONTENT_TYPE: &str = "application/grpc";

/// The two request contracts multiplexed on the listening port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolKind {
    /// Textual HTTP status/body semantics, over HTTP/1.1 or HTTP/2.
    ClassicHttp,
    /// HTTP/2-framed RPC with status/trailer metadata semantics.
    FramedRpc,
}

/// Classify an inbound request.
///
/// An HTTP/2 request with a non-RPC content-type is still ClassicHttp:
/// protocol version alone never forces the RPC branch.
pub fn classify(version: Version, headers: &HeaderMap) -> ProtocolKind {
    let is_rpc_media = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|content_type| content_type.contains(GRPC_CONTENT_TYPE))
        .unwrap_or(false);

    if version == Version::HTTP_2 && is_rpc_media {
        ProtocolKind::FramedRpc
    } else {
        ProtocolKind::ClassicHttp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn h2_grpc_content_type_is_framed_rpc() {
        let headers = headers_with_content_type("application/grpc");
        assert_eq!(classify(Version::HTTP_2, &headers), ProtocolKind::FramedRpc);
    }

    #[test]
    fn h2_grpc_proto_subtype_is_framed_rpc() {
        let headers = headers_with_content_type("application/grpc+proto");
        assert_eq!(classify(Version::HTTP_2, &headers), ProtocolKind::FramedRpc);
    }

    #[test]
    fn h2_plain_text_is_classic_http() {
        let headers = headers_with_content_type("text/plain");
        assert_eq!(classify(Version::HTTP_2, &headers), ProtocolKind::ClassicHttp);
    }

    #[test]
    fn h1_grpc_content_type_is_classic_http() {
        let headers = headers_with_content_type("application/grpc");
        assert_eq!(classify(Version::HTTP_11, &headers), ProtocolKind::ClassicHttp);
    }

    #[test]
    fn missing_content_type_is_classic_http() {
        let headers = HeaderMap::new();
        assert_eq!(classify(Version::HTTP_2, &headers), ProtocolKind::ClassicHttp);
        assert_eq!(classify(Version::HTTP_11, &headers), ProtocolKind::ClassicHttp);
    }

    #[test]
    fn classification_is_idempotent() {
        let headers = headers_with_content_type("application/grpc");
        let first = classify(Version::HTTP_2, &headers);
        let second = classify(Version::HTTP_2, &headers);
        assert_eq!(first, second);
    }
}
