//! Result of a forward attempt and its client-facing rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub const UNAVAILABLE_MESSAGE: &str = "Target server is currently unavailable";
pub const REFUSED_MESSAGE: &str = "Target server connection refused";
pub const TIMEOUT_MESSAGE: &str = "Target server timeout";

/// Tagged result of a rewrite-and-relay attempt.
///
/// Produced by the relay path and turned into a response immediately.
#[derive(Debug)]
pub enum GatewayOutcome {
    /// The upstream answered; status, headers and streaming body.
    Success(Response),
    /// The reachability probe failed; no relay was attempted.
    UpstreamUnreachable,
    /// The relay was refused by the upstream.
    UpstreamRefused,
    /// The relay timed out.
    UpstreamTimeout,
    /// Any other relay failure, with its detail.
    UpstreamError(String),
}

impl GatewayOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayOutcome::Success(response) => response.status(),
            GatewayOutcome::UpstreamUnreachable
            | GatewayOutcome::UpstreamRefused
            | GatewayOutcome::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            GatewayOutcome::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GatewayOutcome::Success(_))
    }
}

impl IntoResponse for GatewayOutcome {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            GatewayOutcome::Success(response) => response,
            GatewayOutcome::UpstreamUnreachable => (status, UNAVAILABLE_MESSAGE).into_response(),
            GatewayOutcome::UpstreamRefused => (status, REFUSED_MESSAGE).into_response(),
            GatewayOutcome::UpstreamTimeout => (status, TIMEOUT_MESSAGE).into_response(),
            // TODO: redact the detail once clients stop relying on it for diagnostics.
            GatewayOutcome::UpstreamError(detail) => {
                (status, format!("Proxy error: {}", detail)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(outcome: GatewayOutcome) -> (StatusCode, String) {
        let response = outcome.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn failure_statuses_and_messages() {
        assert_eq!(
            body_of(GatewayOutcome::UpstreamUnreachable).await,
            (StatusCode::BAD_GATEWAY, UNAVAILABLE_MESSAGE.to_string())
        );
        assert_eq!(
            body_of(GatewayOutcome::UpstreamRefused).await,
            (StatusCode::BAD_GATEWAY, REFUSED_MESSAGE.to_string())
        );
        assert_eq!(
            body_of(GatewayOutcome::UpstreamTimeout).await,
            (StatusCode::GATEWAY_TIMEOUT, TIMEOUT_MESSAGE.to_string())
        );
        assert_eq!(
            body_of(GatewayOutcome::UpstreamError("boom".into())).await,
            (StatusCode::BAD_GATEWAY, "Proxy error: boom".to_string())
        );
    }

    #[tokio::test]
    async fn success_passes_response_through() {
        let upstream = (StatusCode::IM_A_TEAPOT, "short and stout").into_response();
        let outcome = GatewayOutcome::Success(upstream);
        assert!(outcome.is_success());
        assert_eq!(outcome.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(
            body_of(outcome).await,
            (StatusCode::IM_A_TEAPOT, "short and stout".to_string())
        );
    }
}
