//! Terminal-branch decision table.
//!
//! # Responsibilities
//! - Map (protocol kind, auth decision) to exactly one terminal outcome
//! - Keep the two response contracts independently testable
//!
//! # Design Decisions
//! - A pure decision table instead of nested conditionals in the handler
//! - The authorized RPC arm terminates locally (no upstream RPC relay);
//!   a real relay replaces that single arm without touching the rest

use crate::auth::AuthDecision;
use crate::http::protocol::ProtocolKind;

/// Terminal outcome selected for a request once its decision is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Authorized classic traffic: rewrite and forward upstream.
    ForwardHttp { principal: String },
    /// Authorized RPC traffic: answer locally with the RPC success surface.
    AcceptRpc,
    /// Rejected traffic: answer locally with the protocol-correct failure.
    Reject(ProtocolKind),
}

/// Select the terminal branch for a decided request.
pub fn dispatch(kind: ProtocolKind, decision: AuthDecision) -> Outcome {
    match (kind, decision) {
        (ProtocolKind::ClassicHttp, AuthDecision::Authorized { principal }) => {
            Outcome::ForwardHttp { principal }
        }
        (ProtocolKind::FramedRpc, AuthDecision::Authorized { .. }) => Outcome::AcceptRpc,
        (kind, AuthDecision::Unauthorized) => Outcome::Reject(kind),
    }
}
