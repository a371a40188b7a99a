//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so an empty file (or no file) yields the
//! compiled-in upstream target.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The single pinned upstream.
    pub upstream: UpstreamConfig,

    /// Pass-through marker and transparency header settings.
    pub forwarding: ForwardingConfig,

    /// Probe and relay deadlines.
    pub timeouts: TimeoutConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream target configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// `http` or `https`.
    pub scheme: String,

    /// Upstream authority, always with an explicit port (e.g., "bdtunnel.com:2096").
    pub address: String,

    /// Path used when the inbound path is empty or "/".
    pub default_path: String,

    /// Query used together with `default_path`. Empty means no query.
    pub default_query: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            address: "bdtunnel.com:2096".to_string(),
            default_path: "/sub/imzami".to_string(),
            default_query: "format=json".to_string(),
        }
    }
}

impl UpstreamConfig {
    /// Full URL of the default endpoint, for logging.
    pub fn default_endpoint_url(&self) -> String {
        if self.default_query.is_empty() {
            format!("{}://{}{}", self.scheme, self.address, self.default_path)
        } else {
            format!(
                "{}://{}{}?{}",
                self.scheme, self.address, self.default_path, self.default_query
            )
        }
    }
}

/// Forwarding behaviour settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardingConfig {
    /// Header that requests unmediated pass-through.
    pub marker_header: String,

    /// Value the first occurrence of `marker_header` must equal (case-sensitive).
    pub marker_value: String,

    /// Value written to `X-Forwarded-Proto` on relayed requests.
    pub forwarded_proto: String,
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            marker_header: "Forward".to_string(),
            marker_value: "ok".to_string(),
            forwarded_proto: "https".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Reachability probe timeout in seconds.
    pub probe_secs: u64,

    /// Overall relay deadline in seconds. 0 leaves the relay unbounded.
    pub relay_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            probe_secs: 5,
            relay_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format: "pretty" or "json".
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
