//! Rewrite-and-relay forwarding to the pinned upstream.
//!
//! # Per-request state machine
//! ```text
//! Probing ──fail──▶ Unreachable (502)
//!    │
//!    ▼
//! Probed ─▶ Relaying ──ok──▶ Relayed (upstream status)
//!                    └─fail─▶ Failed (classified: 502/504)
//! ```
//! Each transition happens at most once; nothing is retried.
//!
//! # Design Decisions
//! - The inbound header map is moved into the outbound request, not copied;
//!   the transparency headers are added to that same map
//! - `Host` is pinned to the upstream authority
//! - The relay deadline covers the time until the response head arrives

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{self, HeaderValue};
use axum::http::{Request, Response, Version};
use hyper::body::Incoming;
use tokio::time;

use crate::forward::classify::{classify, error_chain};
use crate::forward::client::UpstreamClient;
use crate::forward::error::ForwardError;
use crate::forward::headers::{copy_headers, declared_host, set_forwarded_headers, strip_hop_by_hop};
use crate::forward::outcome::GatewayOutcome;
use crate::forward::probe::Prober;
use crate::forward::upstream::UpstreamTarget;
use crate::observability::{metrics, DispatchStats};

#[derive(Clone)]
pub struct Relay {
    target: Arc<UpstreamTarget>,
    prober: Prober,
    client: UpstreamClient,
    forwarded_proto: HeaderValue,
    deadline: Option<Duration>,
    stats: Arc<DispatchStats>,
}

impl Relay {
    pub fn new(
        target: Arc<UpstreamTarget>,
        prober: Prober,
        client: UpstreamClient,
        forwarded_proto: HeaderValue,
        deadline: Option<Duration>,
        stats: Arc<DispatchStats>,
    ) -> Self {
        Self {
            target,
            prober,
            client,
            forwarded_proto,
            deadline,
            stats,
        }
    }

    pub fn target(&self) -> &UpstreamTarget {
        &self.target
    }

    /// Probe, rewrite, relay, and classify any failure.
    pub async fn forward(&self, request: Request<Body>, client_addr: SocketAddr) -> GatewayOutcome {
        let method = request.method().clone();
        let inbound = request.uri().clone();

        self.stats.record_probe();
        if let Err(e) = self.prober.probe(self.target.authority()).await {
            tracing::warn!(
                method = %method,
                upstream = %self.target.authority(),
                error = %error_chain(&e),
                "Target server unreachable"
            );
            metrics::record_probe_failure();
            return classify(&e);
        }

        let outbound = match self.prepare(request, client_addr) {
            Ok(outbound) => outbound,
            Err(e) => {
                tracing::error!(method = %method, uri = %inbound, error = %e, "Failed to build upstream request");
                return classify(&e);
            }
        };
        let target = outbound.uri().to_string();

        self.stats.record_relay_attempt();
        match self.send(outbound).await {
            Ok(upstream) => GatewayOutcome::Success(relay_response(upstream)),
            Err(e) => {
                let outcome = classify(&e);
                tracing::error!(
                    method = %method,
                    upstream_uri = %target,
                    status = %outcome.status(),
                    error = %error_chain(&e),
                    "Proxy error"
                );
                outcome
            }
        }
    }

    /// Turn the inbound request into the outbound one.
    pub fn prepare(
        &self,
        request: Request<Body>,
        client_addr: SocketAddr,
    ) -> Result<Request<Body>, ForwardError> {
        let (mut parts, body) = request.into_parts();
        let forwarded_host = declared_host(&parts.uri, &parts.headers);

        parts.uri = self.target.rewrite(&parts.uri)?;
        parts.version = Version::HTTP_11;

        strip_hop_by_hop(&mut parts.headers);
        let host = HeaderValue::from_str(self.target.authority().as_str())
            .map_err(axum::http::Error::from)?;
        parts.headers.insert(header::HOST, host);
        set_forwarded_headers(
            &mut parts.headers,
            client_addr.ip(),
            &self.forwarded_proto,
            forwarded_host,
        );

        Ok(Request::from_parts(parts, body))
    }

    async fn send(&self, request: Request<Body>) -> Result<Response<Incoming>, ForwardError> {
        let pending = self.client.request(request);
        match self.deadline {
            Some(deadline) => time::timeout(deadline, pending)
                .await
                .map_err(|_| ForwardError::RelayTimeout(deadline))?
                .map_err(ForwardError::from),
            None => pending.await.map_err(ForwardError::from),
        }
    }
}

fn relay_response(upstream: Response<Incoming>) -> axum::response::Response {
    let (parts, body) = upstream.into_parts();
    let mut response = axum::response::Response::new(Body::new(body));
    *response.status_mut() = parts.status;
    copy_headers(response.headers_mut(), &parts.headers);
    strip_hop_by_hop(response.headers_mut());
    response
}
