/*!
 * Presentation Bridges
 */

use super::types::UsageUpdate;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Receiver of update snapshots
///
/// Called once per accepted sample, from the monitor's event loop. Must not block.
#[cfg_attr(test, mockall::automock)]
pub trait PresentationBridge: Send + Sync {
    fn post(&self, update: UsageUpdate);
}

/// Forwards updates into a tokio channel
#[derive(Debug, Clone)]
pub struct ChannelBridge {
    tx: mpsc::UnboundedSender<UsageUpdate>,
}

impl ChannelBridge {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<UsageUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl PresentationBridge for ChannelBridge {
    fn post(&self, update: UsageUpdate) {
        if self.tx.send(update).is_err() {
            debug!("Presentation receiver dropped, update discarded");
        }
    }
}

/// Keeps only the most recent update, for hosts that poll
#[derive(Debug, Clone, Default)]
pub struct SnapshotBridge {
    latest: Arc<Mutex<Option<UsageUpdate>>>,
    posted: Arc<AtomicU64>,
}

impl SnapshotBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent update, if any arrived
    pub fn latest(&self) -> Option<UsageUpdate> {
        self.latest.lock().clone()
    }

    /// Number of updates received so far
    pub fn posted(&self) -> u64 {
        self.posted.load(Ordering::Relaxed)
    }
}

impl PresentationBridge for SnapshotBridge {
    fn post(&self, update: UsageUpdate) {
        *self.latest.lock() = Some(update);
        self.posted.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(pid: u32) -> UsageUpdate {
        UsageUpdate {
            name: "t".to_string(),
            pid,
            labels: vec![],
            cpu: vec![],
            memory: vec![],
        }
    }

    #[test]
    fn test_snapshot_keeps_latest() {
        let bridge = SnapshotBridge::new();
        assert!(bridge.latest().is_none());

        bridge.post(update(1));
        bridge.post(update(2));

        assert_eq!(bridge.posted(), 2);
        assert_eq!(bridge.latest().map(|u| u.pid), Some(2));
    }

    #[test]
    fn test_channel_bridge_tolerates_closed_receiver() {
        let (bridge, rx) = ChannelBridge::new();
        drop(rx);
        bridge.post(update(1));
    }
}
