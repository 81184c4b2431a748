use doctype_core::BackendStatus;
use tokio::sync::watch;

/// Shared advisory liveness cell.
///
/// The health monitor and request outcomes both write here; writes are
/// unordered relative to each other and the most recent one wins. The value
/// never gates a phase transition.
#[derive(Debug, Clone)]
pub struct StatusSignal {
    tx: watch::Sender<BackendStatus>,
}

impl StatusSignal {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(BackendStatus::Offline);
        Self { tx }
    }

    pub fn set(&self, status: BackendStatus) {
        self.tx.send_replace(status);
    }

    pub fn get(&self) -> BackendStatus {
        *self.tx.borrow()
    }

    /// Read-only subscription for the presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<BackendStatus> {
        self.tx.subscribe()
    }
}

impl Default for StatusSignal {
    fn default() -> Self {
        Self::new()
    }
}
