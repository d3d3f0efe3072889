//! HTTP server setup and request orchestration.
//!
//! # Responsibilities
//! - Create the Axum router with the gateway handler
//! - Serve HTTP/1.1 and cleartext HTTP/2 on one listener
//! - Wire up middleware (tracing, timeout, request ID)
//! - Drive each request through the pipeline:
//!   Received → Classified → CredentialExtracted → Decided
//!   → {Forwarded | RejectedLocally}
//! - Forward authorized classic traffic and relay the upstream response
//!
//! # Design Decisions
//! - One task per connection; the only shared mutable state is the
//!   clients' internal connection pools
//! - Transitions are strictly sequential per request, no state revisited
//! - Traffic that arrived over HTTP/2 is forwarded over h2c prior
//!   knowledge, keeping protocol fidelity end to end
//! - Upstream failures surface as 502; retries belong to the transport

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header::HeaderName, Request, Version},
    response::Response,
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::{authorize, extract_credential, AuthDecision, TokenValidator};
use crate::config::GatewayConfig;
use crate::http::dispatch::{dispatch, Outcome};
use crate::http::protocol::{classify, ProtocolKind};
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::http::response;
use crate::observability::metrics;
use crate::upstream::{rewrite_request, TargetError, UpstreamTarget};

/// Errors constructing the gateway; all fatal at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Target(#[from] TargetError),
    #[error("invalid identity header name `{0}`")]
    IdentityHeader(String),
}

/// Application state injected into the gateway handler.
#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<dyn TokenValidator>,
    pub target: Arc<UpstreamTarget>,
    /// Transport for requests that arrived over HTTP/1.x.
    pub client: Client<HttpConnector, Body>,
    /// Transport for requests that arrived over HTTP/2; speaks h2c prior
    /// knowledge to the upstream.
    pub h2c_client: Client<HttpConnector, Body>,
    pub cookie_name: Arc<str>,
    pub identity_header: HeaderName,
    pub validate_timeout: Duration,
}

impl AppState {
    /// Pick the upstream transport matching the inbound protocol version.
    fn transport_for(&self, version: Version) -> &Client<HttpConnector, Body> {
        if version == Version::HTTP_2 {
            &self.h2c_client
        } else {
            &self.client
        }
    }
}

/// HTTP server hosting the gateway pipeline.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new gateway server with the given configuration and
    /// validator capability.
    pub fn new(
        config: GatewayConfig,
        validator: Arc<dyn TokenValidator>,
    ) -> Result<Self, StartupError> {
        let target = Arc::new(UpstreamTarget::from_config(&config.upstream)?);

        // Both clients pool connections across requests.
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let h2c_client = Client::builder(TokioExecutor::new())
            .http2_only(true)
            .build(HttpConnector::new());

        let identity_header = HeaderName::from_bytes(config.auth.identity_header.as_bytes())
            .map_err(|_| StartupError::IdentityHeader(config.auth.identity_header.clone()))?;

        let state = AppState {
            validator,
            target,
            client,
            h2c_client,
            cookie_name: config.auth.cookie_name.as_str().into(),
            identity_header,
            validate_timeout: Duration::from_secs(config.timeouts.validate_secs),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Gateway request pipeline.
///
/// Every request yields exactly one decision and exactly one terminal
/// outcome; the shaper never runs after forwarding has begun.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    // Received → Classified
    let kind = classify(request.version(), request.headers());

    // Classified → CredentialExtracted
    let credential = extract_credential(kind, request.headers(), &state.cookie_name);

    // CredentialExtracted → Decided
    let decision = authorize(state.validator.as_ref(), &credential, state.validate_timeout).await;

    tracing::debug!(
        request_id = %request_id,
        protocol = ?kind,
        method = %method,
        path = %request.uri().path(),
        authorized = matches!(decision, AuthDecision::Authorized { .. }),
        "Request decided"
    );

    // Decided → {Forwarded | RejectedLocally}
    match dispatch(kind, decision) {
        Outcome::ForwardHttp { principal } => {
            forward(&state, request, &principal, &request_id, &method, start).await
        }
        Outcome::AcceptRpc => {
            metrics::record_request(&method, 200, "rpc", start);
            response::rpc_ok()
        }
        Outcome::Reject(ProtocolKind::FramedRpc) => {
            tracing::debug!(request_id = %request_id, "Rejecting RPC request");
            metrics::record_request(&method, 401, "rpc", start);
            response::rpc_unauthenticated()
        }
        Outcome::Reject(ProtocolKind::ClassicHttp) => {
            tracing::debug!(request_id = %request_id, "Rejecting HTTP request");
            metrics::record_request(&method, 401, "http", start);
            response::http_unauthorized()
        }
    }
}

/// Rewrite and forward an authorized classic request, relaying the upstream
/// response verbatim.
async fn forward(
    state: &AppState,
    mut request: Request<Body>,
    principal: &str,
    request_id: &str,
    method: &str,
    start: Instant,
) -> Response {
    if let Err(error) =
        rewrite_request(&mut request, &state.target, &state.identity_header, principal)
    {
        tracing::error!(request_id = %request_id, %error, "Failed to prepare request for upstream");
        metrics::record_request(method, 502, "http", start);
        return response::bad_gateway();
    }

    tracing::debug!(
        request_id = %request_id,
        principal = %principal,
        upstream = %state.target.authority(),
        "Forwarding authorized request"
    );

    let transport = state.transport_for(request.version());
    match transport.request(request).await {
        Ok(upstream_response) => {
            let status = upstream_response.status();
            metrics::record_request(method, status.as_u16(), "http", start);
            let (parts, body) = upstream_response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(error) => {
            tracing::error!(request_id = %request_id, %error, "Upstream request failed");
            metrics::record_request(method, 502, "http", start);
            response::bad_gateway()
        }
    }
}
