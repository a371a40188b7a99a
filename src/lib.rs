//! Reverse-forwarding gateway pinned to a single upstream.
//!
//! Every request takes exactly one path: marker-triggered pass-through,
//! CONNECT rejection, or rewrite-and-relay to the configured upstream.

pub mod config;
pub mod forward;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
