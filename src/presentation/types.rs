/*!
 * Update Payload
 */

use crate::core::types::{Pid, Timestamp};
use crate::telemetry::UsageHistory;
use serde::{Deserialize, Serialize};

/// Full snapshot of the sliding window for one target
///
/// Renderers redraw from this alone; it is never a delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageUpdate {
    pub name: String,
    pub pid: Pid,
    /// Seconds since the session's time origin
    pub labels: Vec<f64>,
    pub cpu: Vec<f64>,
    pub memory: Vec<f64>,
}

impl UsageUpdate {
    /// Snapshot `history` with labels relative to `origin`
    pub fn from_history(name: &str, pid: Pid, origin: Timestamp, history: &UsageHistory) -> Self {
        Self {
            name: name.to_string(),
            pid,
            labels: history.elapsed_seconds_series(origin).collect(),
            cpu: history.cpu_series().collect(),
            memory: history.memory_series().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
