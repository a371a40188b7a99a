//! Forwarding errors at the transport boundary.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while probing or relaying to an upstream.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The reachability probe could not open a connection.
    #[error("probe connect to {authority} failed: {source}")]
    ProbeConnect {
        authority: String,
        #[source]
        source: std::io::Error,
    },

    /// The reachability probe did not complete in time.
    #[error("probe connect to {authority} timed out after {timeout:?}")]
    ProbeTimeout { authority: String, timeout: Duration },

    /// The outbound request could not be constructed.
    #[error("invalid upstream request: {0}")]
    InvalidTarget(#[from] axum::http::Error),

    /// The upstream round trip failed.
    #[error("upstream request failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    /// The upstream did not answer within the relay deadline.
    #[error("upstream did not respond within {0:?}")]
    RelayTimeout(Duration),
}

impl ForwardError {
    /// True for failures of the reachability probe.
    pub fn is_probe(&self) -> bool {
        matches!(
            self,
            ForwardError::ProbeConnect { .. } | ForwardError::ProbeTimeout { .. }
        )
    }
}
