/*!
 * Usage History
 * Fixed-capacity sliding window over the most recent samples
 *
 * Design: FIFO eviction, insertion order preserved, series are derived on
 * demand and never stored.
 */

use super::sample::UsageSample;
use crate::core::limits::{HISTORY_CAPACITY, MILLIS_PER_SECOND};
use crate::core::types::Timestamp;
use std::collections::VecDeque;

/// Bounded, ordered buffer of recent samples
#[derive(Debug, Clone)]
pub struct UsageHistory {
    samples: VecDeque<UsageSample>,
    capacity: usize,
}

impl UsageHistory {
    /// Create an empty history with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// Create an empty history holding at most `capacity` samples
    ///
    /// A capacity of zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append at the tail, evicting from the head while over capacity
    pub fn append(&mut self, sample: UsageSample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Seconds elapsed since `origin` for each sample, in buffer order
    ///
    /// Widened to i128 so any pair of sampler timestamps subtracts without overflow.
    pub fn elapsed_seconds_series(
        &self,
        origin: Timestamp,
    ) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.samples
            .iter()
            .map(move |s| {
                (i128::from(s.timestamp()) - i128::from(origin)) as f64 / MILLIS_PER_SECOND
            })
    }

    /// CPU readings in buffer order
    pub fn cpu_series(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.samples.iter().map(UsageSample::cpu_percent)
    }

    /// Memory readings in buffer order
    pub fn memory_series(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.samples.iter().map(UsageSample::memory)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &UsageSample> + '_ {
        self.samples.iter()
    }

    /// Oldest buffered sample
    pub fn first(&self) -> Option<&UsageSample> {
        self.samples.front()
    }

    /// Newest buffered sample
    pub fn last(&self) -> Option<&UsageSample> {
        self.samples.back()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for UsageHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ts: Timestamp) -> UsageSample {
        UsageSample::new(ts, ts as f64, ts as f64 * 2.0)
    }

    #[test]
    fn test_append_below_capacity() {
        let mut history = UsageHistory::new();
        for ts in 0..5 {
            history.append(sample(ts));
        }

        assert_eq!(history.len(), 5);
        assert_eq!(history.first().map(|s| s.timestamp()), Some(0));
        assert_eq!(history.last().map(|s| s.timestamp()), Some(4));
    }

    #[test]
    fn test_eviction_keeps_newest_in_order() {
        let mut history = UsageHistory::new();
        for ts in 0..45 {
            history.append(sample(ts));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        let kept: Vec<Timestamp> = history.iter().map(|s| s.timestamp()).collect();
        let expected: Vec<Timestamp> = (15..45).collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn test_series_on_empty_history() {
        let history = UsageHistory::new();
        assert_eq!(history.elapsed_seconds_series(0).count(), 0);
        assert_eq!(history.cpu_series().count(), 0);
        assert_eq!(history.memory_series().count(), 0);
    }

    #[test]
    fn test_elapsed_seconds_relative_to_origin() {
        let mut history = UsageHistory::new();
        history.append(sample(10_000));
        history.append(sample(11_500));

        let labels: Vec<f64> = history.elapsed_seconds_series(10_000).collect();
        assert_eq!(labels, vec![0.0, 1.5]);
    }

    #[test]
    fn test_elapsed_seconds_at_timestamp_extremes() {
        let mut history = UsageHistory::new();
        history.append(sample(i64::MAX));
        history.append(sample(-5));

        let labels: Vec<f64> = history.elapsed_seconds_series(i64::MAX).collect();
        assert_eq!(labels[0], 0.0);
        assert!(labels[1].is_finite() && labels[1] < 0.0);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut history = UsageHistory::with_capacity(0);
        history.append(sample(1));
        history.append(sample(2));

        assert_eq!(history.capacity(), 1);
        assert_eq!(history.last().map(|s| s.timestamp()), Some(2));
    }
}
