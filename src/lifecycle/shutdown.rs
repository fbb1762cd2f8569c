//! Shutdown coordination.

use tokio::sync::broadcast;

/// Broadcast-based shutdown trigger.
///
/// Each running server holds a receiver from [`Shutdown::subscribe`]; a
/// single [`Shutdown::trigger`] stops all of them.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Signal every subscriber. Harmless when nobody is listening.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
