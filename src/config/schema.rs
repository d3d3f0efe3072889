//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The single upstream all authorized classic traffic is forwarded to.
    pub upstream: UpstreamConfig,

    /// Authentication surface settings.
    pub auth: AuthConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080"). HTTP/1.1 and cleartext HTTP/2
    /// are multiplexed on this single port.
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream target configuration.
///
/// Read-only after startup; parsed into an `UpstreamTarget` before the
/// server accepts traffic.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the upstream service. Cleartext http only; TLS to the
    /// upstream belongs to an external terminator.
    pub url: String,

    /// Fixed path every authorized request is rewritten to (the upstream's
    /// generic echo/inspection endpoint).
    pub rewrite_path: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "http://httpbin.org".to_string(),
            rewrite_path: "/anything".to_string(),
        }
    }
}

/// Authentication surface configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Cookie consulted first on the classic HTTP path.
    pub cookie_name: String,

    /// Header carrying the resolved principal to the upstream.
    pub identity_header: String,

    /// Principal reported by the built-in stub validator.
    pub stub_principal: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: "auth_token".to_string(),
            identity_header: "X-Authenticated-User".to_string(),
            stub_principal: "user-123".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Upper bound on a single credential validation in seconds.
    pub validate_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            validate_secs: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
