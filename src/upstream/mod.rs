//! Upstream subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     UpstreamConfig → target.rs (parse once, fatal on error) → UpstreamTarget
//!
//! Per authorized classic request:
//!     rewrite.rs (host substitution, fixed-path rewrite, identity header)
//!     → hyper-util client → upstream → response relayed verbatim
//! ```
//!
//! # Design Decisions
//! - One fixed upstream; no routing or load balancing
//! - Target is immutable after startup and shared via Arc across requests

pub mod rewrite;
pub mod target;

pub use rewrite::{rewrite_request, RewriteError};
pub use target::{TargetError, UpstreamTarget};
