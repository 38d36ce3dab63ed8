//! Stop coordination for the watchdog loop.

use tokio::sync::broadcast;

/// Coordinator for an external stop request.
///
/// Provides a broadcast channel the monitoring loop subscribes to. A stop
/// request ends the loop without running the power-off action.
pub struct Shutdown {
    /// Broadcast channel sender.
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the stop signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Request a stop. Subscribers created afterwards do not see it.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
