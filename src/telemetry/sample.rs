/*!
 * Usage Sample
 */

use crate::core::types::Timestamp;
use serde::{Deserialize, Serialize};

/// One CPU/memory reading of the debug target
///
/// Memory is already expressed in the display unit chosen by the parser's
/// scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSample {
    timestamp: Timestamp,
    cpu_percent: f64,
    memory: f64,
}

impl UsageSample {
    #[inline]
    #[must_use]
    pub const fn new(timestamp: Timestamp, cpu_percent: f64, memory: f64) -> Self {
        Self {
            timestamp,
            cpu_percent,
            memory,
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    #[inline(always)]
    #[must_use]
    pub const fn cpu_percent(&self) -> f64 {
        self.cpu_percent
    }

    #[inline(always)]
    #[must_use]
    pub const fn memory(&self) -> f64 {
        self.memory
    }
}
