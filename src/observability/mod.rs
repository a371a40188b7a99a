//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher and forwarders produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (Prometheus counters, histograms)
//!     → stats.rs (in-process per-path counters)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the trace layer and response headers
//! - Metrics are off by default; recording is a no-op without a recorder
//! - Per-path counters are always on and cost one atomic add

pub mod logging;
pub mod metrics;
pub mod stats;

pub use stats::{DispatchPath, DispatchStats, StatsSnapshot};
