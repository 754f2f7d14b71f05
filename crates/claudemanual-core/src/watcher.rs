//! Documentation watcher placeholder
//!
//! The catalog is re-read from disk on every request, so nothing needs live
//! change notifications. This watcher exists only to keep the wiring point:
//! it ticks on a timer and performs no filesystem I/O. Do not mistake it for
//! a live subsystem.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

pub struct DocWatcher {
    handle: JoinHandle<()>,
}

impl DocWatcher {
    /// Spawn the placeholder tick loop.
    pub fn spawn(interval: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                trace!("doc watcher tick (placeholder, no filesystem polling)");
            }
        });
        Self { handle }
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for DocWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
