//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (HTTP/1.1 or h2c on one port)
//!     → server.rs (Axum setup, orchestration state machine)
//!     → protocol.rs (classify: classic HTTP vs. framed RPC)
//!     → [auth layer extracts and validates the credential]
//!     → dispatch.rs (terminal-branch decision table)
//!     → forward upstream | response.rs (local terminal response)
//! ```

pub mod dispatch;
pub mod protocol;
pub mod request;
pub mod response;
pub mod server;

pub use protocol::ProtocolKind;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::GatewayServer;
