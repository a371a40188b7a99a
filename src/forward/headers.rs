//! Header relay and header manipulation.
//!
//! # Responsibilities
//! - Copy a multi-valued header set between messages
//! - Strip hop-by-hop headers
//! - Add X-Forwarded-For, X-Forwarded-Proto, X-Forwarded-Host
//!
//! # Design Decisions
//! - Copies preserve value order and multiplicity per key
//! - X-Forwarded-For carries the peer address, never a client-supplied chain
//! - Transparency headers replace any inbound value (present exactly once)

use std::net::IpAddr;

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::Uri;

pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
pub const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");
pub const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");

const HOP_BY_HOP: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-connection",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Append every value of `src` onto `dst`.
pub fn copy_headers(dst: &mut HeaderMap, src: &HeaderMap) {
    for (name, value) in src {
        dst.append(name.clone(), value.clone());
    }
}

/// Remove hop-by-hop headers, including any named by `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect();

    for name in listed {
        headers.remove(name);
    }
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
}

/// The host the client declared: the `Host` header, else the URI authority.
pub fn declared_host(uri: &Uri, headers: &HeaderMap) -> Option<HeaderValue> {
    headers.get(header::HOST).cloned().or_else(|| {
        uri.authority()
            .and_then(|authority| HeaderValue::from_str(authority.as_str()).ok())
    })
}

/// Set the three transparency headers, replacing any inbound values.
pub fn set_forwarded_headers(
    headers: &mut HeaderMap,
    client_ip: IpAddr,
    proto: &HeaderValue,
    host: Option<HeaderValue>,
) {
    if let Ok(value) = HeaderValue::try_from(client_ip.to_string()) {
        headers.insert(X_FORWARDED_FOR, value);
    }
    headers.insert(X_FORWARDED_PROTO, proto.clone());
    headers.insert(
        X_FORWARDED_HOST,
        host.unwrap_or_else(|| HeaderValue::from_static("")),
    );
}
