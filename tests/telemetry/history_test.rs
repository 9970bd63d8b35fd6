/*!
 * Usage History Tests
 * Sliding window bounds and ordering
 */

use dbgmon::core::limits::HISTORY_CAPACITY;
use dbgmon::{UsageHistory, UsageSample};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn sample(ts: i64) -> UsageSample {
    UsageSample::new(ts, (ts % 100) as f64, ts as f64)
}

#[test]
fn test_default_capacity() {
    let history = UsageHistory::new();
    assert_eq!(history.capacity(), 30);
    assert!(history.is_empty());
}

#[test]
fn test_thirty_first_sample_evicts_oldest() {
    let mut history = UsageHistory::new();
    for ts in 0..31 {
        history.append(sample(ts));
    }

    assert_eq!(history.len(), 30);
    assert_eq!(history.first().map(|s| s.timestamp()), Some(1));
    assert_eq!(history.last().map(|s| s.timestamp()), Some(30));
}

#[test]
fn test_series_stay_aligned() {
    let mut history = UsageHistory::new();
    for ts in 0..50 {
        history.append(sample(ts * 1000));
    }

    let labels: Vec<f64> = history.elapsed_seconds_series(20_000).collect();
    let memory: Vec<f64> = history.memory_series().collect();

    assert_eq!(labels.len(), history.cpu_series().len());
    assert_eq!(labels.len(), memory.len());
    assert_eq!(labels[0], 0.0);
    assert_eq!(memory[0], 20_000.0);
}

proptest! {
    #[test]
    fn test_window_keeps_newest_in_order(count in 0usize..200) {
        let mut history = UsageHistory::new();
        for ts in 0..count as i64 {
            history.append(sample(ts));
        }

        prop_assert!(history.len() <= HISTORY_CAPACITY);
        prop_assert_eq!(history.len(), count.min(HISTORY_CAPACITY));

        let kept: Vec<i64> = history.iter().map(|s| s.timestamp()).collect();
        let start = count.saturating_sub(HISTORY_CAPACITY) as i64;
        let expected: Vec<i64> = (start..count as i64).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn test_custom_capacity_bound(capacity in 1usize..64, count in 0usize..200) {
        let mut history = UsageHistory::with_capacity(capacity);
        for ts in 0..count as i64 {
            history.append(sample(ts));
        }
        prop_assert_eq!(history.len(), count.min(capacity));
    }
}
