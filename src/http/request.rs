//! Request correlation.
//!
//! # Responsibilities
//! - Generate a UUID v4 request ID unless the client sent one
//! - Echo the ID on the response
//! - Expose the ID to handlers for log fields
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The ID header travels to the upstream with the other inbound headers

use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Produces `x-request-id` values from random UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read access to the request ID from handlers.
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("unknown")
    }
}
