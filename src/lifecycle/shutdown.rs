//! Shutdown coordination for the gateway.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Long-running tasks subscribe and stop when the signal fires. Cloning
/// yields a handle to the same coordinator.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the shutdown signal. Later calls are no-ops.
    pub fn trigger(&self) {
        if !self.triggered.swap(true, Ordering::SeqCst) {
            tracing::info!(subscribers = self.tx.receiver_count(), "Triggering shutdown");
            let _ = self.tx.send(());
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Trigger shutdown once an OS termination signal arrives.
    pub async fn trigger_on_signal(self) {
        crate::lifecycle::signals::wait_for_termination().await;
        self.trigger();
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
