//! CONNECT handling.
//!
//! Tunnel establishment is disabled: every CONNECT that reaches this point is
//! answered with 405, whatever host it names.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::forward::headers::declared_host;

pub const TUNNEL_REJECTION_MESSAGE: &str = "CONNECT method not allowed";

pub fn reject_tunnel(request: &Request<Body>) -> Response {
    let target = declared_host(request.uri(), request.headers());
    let target = target
        .as_ref()
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    tracing::info!(destination = %target, "Rejecting CONNECT request");
    (StatusCode::METHOD_NOT_ALLOWED, TUNNEL_REJECTION_MESSAGE).into_response()
}
