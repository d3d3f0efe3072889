//! Authenticating Reverse-Proxy Gateway
//!
//! A token-enforcing gateway in front of a single upstream, built with Tokio
//! and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────────┐
//!                      │                  AUTH GATEWAY                      │
//!                      │                                                    │
//!   Client Request     │  ┌──────────┐   ┌───────────┐   ┌─────────────┐   │
//!   ──────────────────▶│  │  http    │──▶│ protocol  │──▶│    auth     │   │
//!   (HTTP/1.1 or h2c)  │  │ server   │   │ classify  │   │extract+check│   │
//!                      │  └──────────┘   └───────────┘   └──────┬──────┘   │
//!                      │                                        │          │
//!                      │                 Unauthorized ◀─────────┴──▶ Authorized
//!                      │                      │                      │     │
//!                      │               ┌──────▼──────┐        ┌──────▼───┐ │
//!   Client Response    │               │  response   │        │ upstream │ │
//!   ◀──────────────────│               │  shaping    │        │ rewrite  │─┼───▶ Upstream
//!                      │               └─────────────┘        │ +forward │ │     Service
//!                      │                                      └──────────┘ │
//!                      │  ┌──────────────────────────────────────────────┐ │
//!                      │  │ config │ lifecycle │ observability (logs,    │ │
//!                      │  │        │           │ metrics, request IDs)   │ │
//!                      │  └──────────────────────────────────────────────┘ │
//!                      └───────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use auth_gateway::auth::{StaticValidator, TokenValidator};
use auth_gateway::config::{self, GatewayConfig};
use auth_gateway::http::GatewayServer;
use auth_gateway::lifecycle::{signals, Shutdown};
use auth_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "auth-gateway")]
#[command(about = "Authenticating reverse proxy for HTTP/1.1 and gRPC traffic", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        rewrite_path = %config.upstream.rewrite_path,
        "auth-gateway v0.1.0 starting"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Bind TCP listener; axum::serve multiplexes HTTP/1.1 and h2c on it.
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // The stub validator is a substitutable default; a real identity-provider
    // integration implements TokenValidator and is injected here instead.
    let validator: Arc<dyn TokenValidator> =
        Arc::new(StaticValidator::new(config.auth.stub_principal.clone()));

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    let server = GatewayServer::new(config, validator)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
