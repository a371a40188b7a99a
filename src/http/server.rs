//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the upstream target, client, and forwarders from config
//! - Create the Axum Router with a single catch-all handler
//! - Wire up middleware (request ID, tracing)
//! - Serve on a listener until shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{HeaderName, HeaderValue, InvalidHeaderName, InvalidHeaderValue};
use axum::http::uri::InvalidUri;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::forward::client::build_client;
use crate::forward::{Marker, PassThrough, Prober, Relay, UpstreamTarget};
use crate::http::dispatch::dispatch;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::observability::DispatchStats;

/// Errors raised while assembling the server from configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid upstream target: {0}")]
    Target(#[from] InvalidUri),

    #[error("invalid header name: {0}")]
    HeaderName(#[from] InvalidHeaderName),

    #[error("invalid header value: {0}")]
    HeaderValue(#[from] InvalidHeaderValue),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] rustls::Error),
}

/// Application state injected into the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub pass_through: PassThrough,
    pub relay: Relay,
    pub stats: Arc<DispatchStats>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    stats: Arc<DispatchStats>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, BuildError> {
        let target = Arc::new(UpstreamTarget::from_config(&config.upstream)?);
        let probe_timeout = Duration::from_secs(config.timeouts.probe_secs);
        let relay_deadline = match config.timeouts.relay_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let client = build_client(probe_timeout)?;
        let marker = Marker::new(
            HeaderName::from_bytes(config.forwarding.marker_header.as_bytes())?,
            HeaderValue::from_str(&config.forwarding.marker_value)?,
        );
        let forwarded_proto = HeaderValue::from_str(&config.forwarding.forwarded_proto)?;

        let stats = Arc::new(DispatchStats::new());
        let state = AppState {
            pass_through: PassThrough::new(marker, client.clone()),
            relay: Relay::new(
                target,
                Prober::new(probe_timeout),
                client,
                forwarded_proto,
                relay_deadline,
                stats.clone(),
            ),
            stats: stats.clone(),
        };

        let router = Self::build_router(state);
        Ok(Self {
            router,
            config,
            stats,
        })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The handler sits in the fallback so that every path, including the
    /// empty path of authority-form CONNECT requests, reaches it.
    fn build_router(state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID));

        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(middleware)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.default_endpoint_url(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for serving or driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Per-path dispatch counters.
    pub fn stats(&self) -> Arc<DispatchStats> {
        self.stats.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
