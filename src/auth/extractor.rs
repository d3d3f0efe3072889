//! Credential extraction.
//!
//! # Responsibilities
//! - Pull the bearer credential out of a request using protocol-specific rules
//! - Framed RPC: `authorization` metadata entry, `Bearer ` prefix stripped
//! - Classic HTTP: named cookie first, `Authorization` header as fallback
//!
//! # Design Decisions
//! - Extraction never fails; a missing credential is the empty string,
//!   deferred to validation
//! - Header lookups are case-insensitive (HeaderMap semantics); the
//!   `Bearer ` prefix match is exact, single trailing space

use axum::http::{header, HeaderMap};

use crate::http::protocol::ProtocolKind;

const BEARER_PREFIX: &str = "Bearer ";

/// An opaque credential pulled from a request. May be empty.
///
/// The validator treats the contents as an opaque key; no structure is
/// assumed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Extract the credential for a classified request.
pub fn extract_credential(kind: ProtocolKind, headers: &HeaderMap, cookie_name: &str) -> Credential {
    match kind {
        ProtocolKind::FramedRpc => rpc_credential(headers),
        ProtocolKind::ClassicHttp => http_credential(headers, cookie_name),
    }
}

/// RPC metadata rule: raw `authorization` entry, bearer prefix stripped if
/// present, otherwise passed through unchanged.
fn rpc_credential(headers: &HeaderMap) -> Credential {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    Credential(strip_bearer(raw).to_string())
}

/// Classic rule: named cookie wins; `Authorization` header is the fallback.
fn http_credential(headers: &HeaderMap, cookie_name: &str) -> Credential {
    if let Some(token) = cookie_value(headers, cookie_name) {
        return Credential(token);
    }
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    Credential(strip_bearer(raw).to_string())
}

fn strip_bearer(raw: &str) -> &str {
    raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw)
}

/// Find a cookie by name in the `Cookie` header (`k=v; k2=v2` pairs).
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())?
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(entries: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (key, value) in entries {
            map.insert(*key, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn rpc_bearer_prefix_is_stripped() {
        let headers = headers(&[("authorization", "Bearer xyz")]);
        let credential = extract_credential(ProtocolKind::FramedRpc, &headers, "auth_token");
        assert_eq!(credential.as_str(), "xyz");
    }

    #[test]
    fn rpc_raw_value_passes_through_unchanged() {
        let headers = headers(&[("authorization", "some-opaque-value")]);
        let credential = extract_credential(ProtocolKind::FramedRpc, &headers, "auth_token");
        assert_eq!(credential.as_str(), "some-opaque-value");
    }

    #[test]
    fn rpc_missing_authorization_is_empty() {
        let credential =
            extract_credential(ProtocolKind::FramedRpc, &HeaderMap::new(), "auth_token");
        assert!(credential.is_empty());
    }

    #[test]
    fn http_cookie_wins() {
        let headers = headers(&[
            ("cookie", "auth_token=abc; theme=dark"),
            ("authorization", "Bearer def"),
        ]);
        let credential = extract_credential(ProtocolKind::ClassicHttp, &headers, "auth_token");
        assert_eq!(credential.as_str(), "abc");
    }

    #[test]
    fn http_falls_back_to_authorization_header() {
        let headers = headers(&[("authorization", "Bearer def")]);
        let credential = extract_credential(ProtocolKind::ClassicHttp, &headers, "auth_token");
        assert_eq!(credential.as_str(), "def");
    }

    #[test]
    fn http_cookie_name_must_match_exactly() {
        let headers = headers(&[("cookie", "auth_token_v2=abc")]);
        let credential = extract_credential(ProtocolKind::ClassicHttp, &headers, "auth_token");
        assert!(credential.is_empty());
    }

    #[test]
    fn http_both_sources_absent_is_empty() {
        let credential =
            extract_credential(ProtocolKind::ClassicHttp, &HeaderMap::new(), "auth_token");
        assert!(credential.is_empty());
    }

    #[test]
    fn cookie_pairs_are_trimmed() {
        let headers = headers(&[("cookie", "first=1;  auth_token=tok1 ; last=9")]);
        let credential = extract_credential(ProtocolKind::ClassicHttp, &headers, "auth_token");
        assert_eq!(credential.as_str(), "tok1");
    }
}
