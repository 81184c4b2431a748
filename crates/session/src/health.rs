use std::time::Duration;

use doctype_api_client::ApiClient;
use doctype_core::BackendStatus;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::status::StatusSignal;

/// Periodic backend liveness probe.
///
/// Probes once immediately, then on a fixed interval for the lifetime of the
/// session, regardless of workflow phase. Probes run sequentially on one
/// repeating timer, so they never overlap; each outcome overwrites the
/// status signal and the most recent observation wins.
///
/// Call [`HealthMonitor::shutdown`] when the session ends. Dropping the
/// monitor without shutting down aborts the task so no timer outlives it.
pub struct HealthMonitor {
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl HealthMonitor {
    pub fn spawn(client: ApiClient, signal: StatusSignal, interval: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run(client, signal, interval, shutdown_rx));
        Self {
            shutdown: shutdown_tx,
            handle: Some(handle),
        }
    }

    /// Cancel the probe timer and wait for the task to stop.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn run(
    client: ApiClient,
    signal: StatusSignal,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    // A slow probe delays the next tick instead of bursting to catch up.
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    // The first tick fires immediately, which doubles as the startup probe.
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let status = match client.probe().await {
                    Ok(_) => BackendStatus::Online,
                    Err(e) => {
                        debug!("liveness probe failed: {e}");
                        BackendStatus::Offline
                    }
                };
                signal.set(status);
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    debug!("health monitor shutting down");
                    break;
                }
            }
        }
    }
}
