//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::Request, routing::any, Json, Router};
use tokio::net::TcpListener;

use auth_gateway::auth::StaticValidator;
use auth_gateway::config::GatewayConfig;
use auth_gateway::http::GatewayServer;
use auth_gateway::lifecycle::Shutdown;

/// Start an httpbin-style echo upstream that reports what it received.
///
/// Serves HTTP/1.1 and h2c, so forwarded HTTP/2 traffic lands as-is.
pub async fn start_echo_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/{*path}", any(echo))
        .route("/", any(echo));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

async fn echo(request: Request) -> Json<serde_json::Value> {
    let headers: HashMap<String, String> = request
        .headers()
        .iter()
        .filter_map(|(key, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (key.as_str().to_string(), value.to_string()))
        })
        .collect();

    Json(serde_json::json!({
        "method": request.method().as_str(),
        "path": request.uri().path(),
        "headers": headers,
    }))
}

/// Start the gateway on an ephemeral port with the stub validator.
///
/// The returned `Shutdown` handle must be kept alive for the duration of
/// the test; dropping it stops the server.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let validator = Arc::new(StaticValidator::new(config.auth.stub_principal.clone()));
    let server = GatewayServer::new(config, validator).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Reserve an address nothing is listening on.
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
