//! Per-request dispatch.
//!
//! Order is fixed: pass-through first (the marker bypasses every other
//! policy, CONNECT rejection included), then CONNECT rejection, then
//! rewrite-and-relay. Exactly one of the three produces the response.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Method, Request},
    response::{IntoResponse, Response},
};

use crate::forward::tunnel::reject_tunnel;
use crate::forward::Interception;
use crate::http::request::RequestIdExt;
use crate::http::server::AppState;
use crate::observability::{metrics, DispatchPath};

/// Catch-all handler for every method and path.
pub async fn dispatch(
    State(state): State<AppState>,
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_string();
    let method = request.method().clone();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        uri = %request.uri(),
        client = %client_addr,
        "Dispatching request"
    );

    let (path, response) = match state.pass_through.intercept(request).await {
        Interception::Handled(response) => (DispatchPath::PassThrough, response),
        Interception::Continue(request) if method == Method::CONNECT => {
            (DispatchPath::TunnelRejected, reject_tunnel(&request))
        }
        Interception::Continue(request) => {
            let outcome = state.relay.forward(request, client_addr).await;
            (DispatchPath::Relay, outcome.into_response())
        }
    };

    state.stats.record(path);
    metrics::record_request(path, response.status().as_u16(), start_time);

    tracing::debug!(
        request_id = %request_id,
        path = %path,
        status = %response.status(),
        "Request dispatched"
    );

    response
}
