/*!
 * Core Types
 * Common types used across the monitor
 */

/// OS process id of a debug target or sampler. `0` means "not yet known".
pub type Pid = u32;

/// Sample timestamp in milliseconds, as reported by the sampler
///
/// The sampler decides the clock (epoch or monotonic); only differences
/// between timestamps are ever interpreted.
pub type Timestamp = i64;

/// Debug adapter thread identifier
pub type ThreadId = i64;

/// Monotonic counter distinguishing successive sampler instances
pub type Generation = u64;
