//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Classified request:
//!     → extractor.rs (protocol-specific credential lookup, never fails)
//!     → validator.rs (TokenValidator capability, fail-closed policy)
//!     → AuthDecision consumed by the dispatch table
//! ```
//!
//! # Design Decisions
//! - Absence of a credential is an empty value, not an error
//! - Fail closed: validator errors and timeouts reject the request
//! - The identity authority is an injected capability, never ambient state

pub mod extractor;
pub mod validator;

pub use extractor::{extract_credential, Credential};
pub use validator::{authorize, AuthDecision, StaticValidator, TokenValidator, ValidatorError};
