//! Credential validation contract.
//!
//! # Responsibilities
//! - Define the identity-authority capability the gateway depends on
//! - Apply the fail-closed policy around it (empty token, errors, timeouts)
//! - Ship a substitutable stub implementation
//!
//! # Design Decisions
//! - The validator is an injected trait object, not a free function, so the
//!   real identity-provider integration swaps in without touching dispatch
//! - Every validation is bounded by a timeout; expiry rejects the request
//! - Decisions are computed once per request and never cached

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::extractor::Credential;
use crate::observability::metrics;

/// Result of validating a credential against the identity authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    /// Credential is valid; carries the resolved principal identity.
    Authorized { principal: String },
    /// Credential is missing, invalid, or could not be checked.
    Unauthorized,
}

/// Error surfaced by a validator backend.
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("identity provider unreachable: {0}")]
    Unreachable(String),
    #[error("identity provider returned a malformed response: {0}")]
    Malformed(String),
}

/// Pluggable identity-authority capability.
///
/// Implementations must be side-effect free from the gateway's point of
/// view and safe to call concurrently.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Answer whether `token` is currently valid, and for whom.
    async fn validate(&self, token: &str) -> Result<AuthDecision, ValidatorError>;
}

/// Reference stub: any non-empty token maps to a fixed principal.
///
/// A substitutable default for environments without an identity provider,
/// not load-bearing security logic.
#[derive(Debug, Clone)]
pub struct StaticValidator {
    principal: String,
}

impl StaticValidator {
    pub fn new(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
        }
    }
}

#[async_trait]
impl TokenValidator for StaticValidator {
    async fn validate(&self, token: &str) -> Result<AuthDecision, ValidatorError> {
        if token.is_empty() {
            Ok(AuthDecision::Unauthorized)
        } else {
            Ok(AuthDecision::Authorized {
                principal: self.principal.clone(),
            })
        }
    }
}

/// Resolve a credential to a decision, applying the fail-closed policy.
///
/// An empty credential is Unauthorized without consulting the validator.
/// Validator errors and timeouts map to Unauthorized; they are logged and
/// counted, never propagated to the caller.
pub async fn authorize(
    validator: &dyn TokenValidator,
    credential: &Credential,
    deadline: Duration,
) -> AuthDecision {
    if credential.is_empty() {
        return AuthDecision::Unauthorized;
    }

    match tokio::time::timeout(deadline, validator.validate(credential.as_str())).await {
        Ok(Ok(decision)) => decision,
        Ok(Err(error)) => {
            tracing::warn!(%error, "Validator failure, rejecting request");
            metrics::record_validator_failure("error");
            AuthDecision::Unauthorized
        }
        Err(_) => {
            tracing::warn!(deadline = ?deadline, "Validator timed out, rejecting request");
            metrics::record_validator_failure("timeout");
            AuthDecision::Unauthorized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingValidator;

    #[async_trait]
    impl TokenValidator for FailingValidator {
        async fn validate(&self, _token: &str) -> Result<AuthDecision, ValidatorError> {
            Err(ValidatorError::Unreachable("connection refused".to_string()))
        }
    }

    struct SlowValidator;

    #[async_trait]
    impl TokenValidator for SlowValidator {
        async fn validate(&self, _token: &str) -> Result<AuthDecision, ValidatorError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(AuthDecision::Unauthorized)
        }
    }

    struct UnreachableValidator;

    #[async_trait]
    impl TokenValidator for UnreachableValidator {
        async fn validate(&self, _token: &str) -> Result<AuthDecision, ValidatorError> {
            unreachable!("validator must not be consulted for empty credentials");
        }
    }

    const DEADLINE: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn stub_accepts_non_empty_token() {
        let validator = StaticValidator::new("user-123");
        let decision = authorize(&validator, &Credential::from("tok1"), DEADLINE).await;
        assert_eq!(
            decision,
            AuthDecision::Authorized {
                principal: "user-123".to_string()
            }
        );
    }

    #[tokio::test]
    async fn empty_credential_skips_the_validator() {
        let decision = authorize(&UnreachableValidator, &Credential::from(""), DEADLINE).await;
        assert_eq!(decision, AuthDecision::Unauthorized);
    }

    #[tokio::test]
    async fn validator_error_is_fail_closed() {
        let decision = authorize(&FailingValidator, &Credential::from("tok1"), DEADLINE).await;
        assert_eq!(decision, AuthDecision::Unauthorized);
    }

    #[tokio::test(start_paused = true)]
    async fn validator_timeout_is_fail_closed() {
        let decision =
            authorize(&SlowValidator, &Credential::from("tok1"), Duration::from_millis(50)).await;
        assert_eq!(decision, AuthDecision::Unauthorized);
    }
}
