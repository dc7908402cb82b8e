//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the two proxy handlers
//! - Build the shared upstream client
//! - Wire up middleware (tracing, request ID)
//! - Serve on a bound listener until shutdown

use axum::{http::Request, routing::any, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::Span;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{ProxyConfig, UpstreamConfig};
use crate::http::request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
use crate::http::response::BoxError;
use crate::http::token::{token_proxy, TOKEN_PATH};
use crate::http::user_info::{user_info_proxy, USER_INFO_PATH};

/// Error type for server construction.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Application state injected into handlers.
///
/// Holds no per-request mutable state; the client is shared only for
/// connection reuse.
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub upstream: Arc<UpstreamConfig>,
    pub max_body_size: usize,
}

impl AppState {
    pub fn new(config: &ProxyConfig) -> Result<Self, ServerError> {
        Ok(Self {
            client: build_client(&config.upstream)?,
            upstream: Arc::new(config.upstream.clone()),
            max_body_size: config.security.max_body_size,
        })
    }

    /// Send `request` upstream on its own task. The exchange runs to completion
    /// even if the caller's future is dropped mid-flight.
    pub async fn execute_detached(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, BoxError> {
        let client = self.client.clone();
        let exchange = tokio::spawn(async move { client.execute(request).await });
        match exchange.await {
            Ok(result) => result.map_err(Into::into),
            Err(e) => Err(e.into()),
        }
    }
}

/// Build the upstream client. Nothing is retried; redirects follow the
/// client default.
pub fn build_client(upstream: &UpstreamConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = upstream.timeout() {
        builder = builder.timeout(timeout);
    }
    if let Some(timeout) = upstream.connect_timeout() {
        builder = builder.connect_timeout(timeout);
    }
    if !upstream.use_system_proxy {
        builder = builder.no_proxy();
    }
    builder.build()
}

/// Span for one inbound request. Records the path only; the query string
/// carries access tokens.
fn request_span<B>(request: &Request<B>) -> Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = request_id(request),
    )
}

/// HTTP server for the OAuth proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let state = AppState::new(&config)?;
        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route(TOKEN_PATH, any(token_proxy))
            .route(USER_INFO_PATH, any(user_info_proxy))
            .with_state(state)
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
            .layer(TraceLayer::new_for_http().make_span_with(request_span::<axum::body::Body>))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuidV4))
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires or its sender is dropped.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            token_path = TOKEN_PATH,
            user_info_path = USER_INFO_PATH,
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
}
