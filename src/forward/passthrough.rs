//! Marker-triggered pass-through forwarding.
//!
//! A request whose marker header's first value equals the sentinel is
//! round-tripped as-is to the destination its own URI names. Nothing about
//! the request is rewritten and no probe runs. Any other request is handed
//! back untouched.

use axum::body::Body;
use axum::http::header::{HeaderMap, HeaderName, HeaderValue};
use axum::http::{Request, StatusCode, Version};
use axum::response::{IntoResponse, Response};

use crate::forward::classify::error_chain;
use crate::forward::client::UpstreamClient;
use crate::forward::headers::{copy_headers, strip_hop_by_hop};

/// The marker header and the value that triggers pass-through.
#[derive(Debug, Clone)]
pub struct Marker {
    header: HeaderName,
    value: HeaderValue,
}

impl Marker {
    pub fn new(header: HeaderName, value: HeaderValue) -> Self {
        Self { header, value }
    }

    /// Exact, case-sensitive match on the first occurrence only.
    pub fn matches(&self, headers: &HeaderMap) -> bool {
        headers
            .get(&self.header)
            .is_some_and(|value| *value == self.value)
    }
}

/// What the pass-through step decided for one request.
#[derive(Debug)]
pub enum Interception {
    /// The request was forwarded; this response is final.
    Handled(Response),
    /// Not marked; the request continues to the next step unchanged.
    Continue(Request<Body>),
}

#[derive(Clone)]
pub struct PassThrough {
    marker: Marker,
    client: UpstreamClient,
}

impl PassThrough {
    pub fn new(marker: Marker, client: UpstreamClient) -> Self {
        Self { marker, client }
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    pub async fn intercept(&self, request: Request<Body>) -> Interception {
        if !self.marker.matches(request.headers()) {
            return Interception::Continue(request);
        }
        Interception::Handled(self.round_trip(request).await)
    }

    async fn round_trip(&self, mut request: Request<Body>) -> Response {
        let method = request.method().clone();
        let target = request.uri().to_string();
        *request.version_mut() = Version::HTTP_11;

        tracing::debug!(method = %method, destination = %target, "Pass-through round trip");

        match self.client.request(request).await {
            Ok(upstream) => {
                let (parts, body) = upstream.into_parts();
                let mut response = Response::new(Body::new(body));
                *response.status_mut() = parts.status;
                copy_headers(response.headers_mut(), &parts.headers);
                strip_hop_by_hop(response.headers_mut());
                response
            }
            Err(e) => {
                let detail = error_chain(&e);
                tracing::warn!(method = %method, destination = %target, error = %detail, "Pass-through failed");
                (StatusCode::SERVICE_UNAVAILABLE, detail).into_response()
            }
        }
    }
}
