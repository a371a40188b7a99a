//! Upstream reachability probe.
//!
//! A bounded TCP connect against the upstream authority, run before every
//! relay. The connection is closed as soon as it opens.

use std::time::Duration;

use axum::http::uri::Authority;
use tokio::net::TcpStream;
use tokio::time;

use crate::forward::error::ForwardError;

#[derive(Debug, Clone, Copy)]
pub struct Prober {
    timeout: Duration,
}

impl Prober {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Open and immediately close a TCP connection to `authority`.
    pub async fn probe(&self, authority: &Authority) -> Result<(), ForwardError> {
        let addr = authority.as_str();
        match time::timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                Ok(())
            }
            Ok(Err(source)) => Err(ForwardError::ProbeConnect {
                authority: addr.to_string(),
                source,
            }),
            Err(_) => Err(ForwardError::ProbeTimeout {
                authority: addr.to_string(),
                timeout: self.timeout,
            }),
        }
    }
}
