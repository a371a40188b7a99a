//! Error classification.
//!
//! Maps a forwarding failure onto a [`GatewayOutcome`] by inspecting typed
//! errors in the source chain rather than matching on message text.
//!
//! ```text
//! probe failure                         → UpstreamUnreachable (502)
//! io::ErrorKind::ConnectionRefused      → UpstreamRefused     (502)
//! io::ErrorKind::TimedOut / deadline    → UpstreamTimeout     (504)
//! anything else                         → UpstreamError(chain) (502)
//! ```

use std::error::Error as StdError;
use std::io;

use crate::forward::error::ForwardError;
use crate::forward::outcome::GatewayOutcome;

/// Relay failure category derived from an error chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Refused,
    Timeout,
    Other,
}

/// Classify a forwarding failure into the outcome written to the client.
pub fn classify(err: &ForwardError) -> GatewayOutcome {
    if err.is_probe() {
        return GatewayOutcome::UpstreamUnreachable;
    }
    if let ForwardError::RelayTimeout(_) = err {
        return GatewayOutcome::UpstreamTimeout;
    }

    match failure_kind(err) {
        FailureKind::Refused => GatewayOutcome::UpstreamRefused,
        FailureKind::Timeout => GatewayOutcome::UpstreamTimeout,
        FailureKind::Other => GatewayOutcome::UpstreamError(error_chain(err)),
    }
}

/// Walk the source chain looking for a refused connection or a timeout.
pub fn failure_kind(err: &(dyn StdError + 'static)) -> FailureKind {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            match io_err.kind() {
                io::ErrorKind::ConnectionRefused => return FailureKind::Refused,
                io::ErrorKind::TimedOut => return FailureKind::Timeout,
                _ => {}
            }
        }
        if let Some(hyper_err) = err.downcast_ref::<hyper::Error>() {
            if hyper_err.is_timeout() {
                return FailureKind::Timeout;
            }
        }
        current = err.source();
    }
    FailureKind::Other
}

/// Render an error and all of its sources as `outer: inner: root`.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();
    while let Some(source) = current {
        let text = source.to_string();
        if !rendered.ends_with(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        current = source.source();
    }
    rendered
}
