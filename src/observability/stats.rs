//! In-process dispatch counters.
//!
//! One counter per dispatch path plus the probe/relay sub-steps. Each request
//! increments exactly one of the path counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// The path a request took through the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchPath {
    PassThrough,
    TunnelRejected,
    Relay,
}

impl DispatchPath {
    /// Metric label value.
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchPath::PassThrough => "pass_through",
            DispatchPath::TunnelRejected => "tunnel_rejected",
            DispatchPath::Relay => "relay",
        }
    }
}

impl std::fmt::Display for DispatchPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default)]
pub struct DispatchStats {
    pass_through: AtomicU64,
    tunnel_rejected: AtomicU64,
    relayed: AtomicU64,
    probes: AtomicU64,
    relay_attempts: AtomicU64,
}

/// Point-in-time copy of [`DispatchStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub pass_through: u64,
    pub tunnel_rejected: u64,
    pub relayed: u64,
    pub probes: u64,
    pub relay_attempts: u64,
}

impl StatsSnapshot {
    /// Requests that completed a dispatch path.
    pub fn dispatched(&self) -> u64 {
        self.pass_through + self.tunnel_rejected + self.relayed
    }
}

impl DispatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, path: DispatchPath) {
        let counter = match path {
            DispatchPath::PassThrough => &self.pass_through,
            DispatchPath::TunnelRejected => &self.tunnel_rejected,
            DispatchPath::Relay => &self.relayed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_probe(&self) {
        self.probes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_relay_attempt(&self) {
        self.relay_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            pass_through: self.pass_through.load(Ordering::Relaxed),
            tunnel_rejected: self.tunnel_rejected.load(Ordering::Relaxed),
            relayed: self.relayed.load(Ordering::Relaxed),
            probes: self.probes.load(Ordering::Relaxed),
            relay_attempts: self.relay_attempts.load(Ordering::Relaxed),
        }
    }
}
