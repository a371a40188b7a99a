//! Forwarding core.
//!
//! # Data Flow
//! ```text
//! Request
//!     → passthrough.rs (marker present? round trip as-is, done)
//!     → CONNECT? tunnel.rs (405, done)
//!     → relay.rs
//!         → probe.rs (bounded TCP connect to the upstream)
//!         → upstream.rs (path/query rewrite)
//!         → headers.rs (hop-by-hop strip, X-Forwarded-*)
//!         → client.rs (round trip)
//!         → classify.rs (failure → GatewayOutcome)
//! ```
//!
//! # Design Decisions
//! - Exactly one path runs per request
//! - Every failure is terminal and answered where it occurs
//! - No retries, no backoff

pub mod classify;
pub mod client;
pub mod error;
pub mod headers;
pub mod outcome;
pub mod passthrough;
pub mod probe;
pub mod relay;
pub mod tunnel;
pub mod upstream;

pub use error::ForwardError;
pub use outcome::GatewayOutcome;
pub use passthrough::{Interception, Marker, PassThrough};
pub use probe::Prober;
pub use relay::Relay;
pub use upstream::UpstreamTarget;
