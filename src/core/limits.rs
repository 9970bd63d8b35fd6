/*!
 * Limits and Constants
 *
 * Central place for the monitor's fixed sizes, default control bytes and
 * environment variable names.
 */

// =============================================================================
// HISTORY
// =============================================================================

/// Number of samples kept in the sliding window
pub const HISTORY_CAPACITY: usize = 30;

/// Milliseconds per chart label unit (labels are seconds)
pub const MILLIS_PER_SECOND: f64 = 1000.0;

/// Memory scale turning raw bytes into MiB
pub const BYTES_TO_MIB: f64 = 1.0 / 1_048_576.0;

/// Minimum whitespace separated fields in a sample line
pub const SAMPLE_MIN_FIELDS: usize = 3;

// =============================================================================
// SAMPLER PROCESS
// =============================================================================

/// Nominal pty width; nothing is ever displayed
pub const DEFAULT_PTY_COLS: u16 = 80;

/// Nominal pty height
pub const DEFAULT_PTY_ROWS: u16 = 30;

/// Flag placed before the target pid on the sampler command line
pub const DEFAULT_PID_FLAG: &str = "-p";

/// Control byte asking the sampler to exit
pub const DEFAULT_QUIT_BYTE: u8 = b'q';

/// Control byte toggling the sampler between paused and sampling
pub const DEFAULT_PAUSE_TOGGLE_BYTE: u8 = b' ';

/// Control byte marking a step boundary
pub const DEFAULT_STEP_BYTE: u8 = b's';

/// Read buffer for the pty reader thread
pub const PTY_READ_BUFFER: usize = 4096;

// =============================================================================
// RUNTIME
// =============================================================================

/// Capacity of the inbound debug event queue
pub const DEBUG_EVENT_QUEUE_CAPACITY: usize = 256;

// =============================================================================
// ENVIRONMENT
// =============================================================================

pub const ENV_SAMPLER_PATH: &str = "DBGMON_SAMPLER_PATH";
pub const ENV_SAMPLER_ARGS: &str = "DBGMON_SAMPLER_ARGS";
pub const ENV_MEMORY_SCALE: &str = "DBGMON_MEMORY_SCALE";
pub const ENV_WORKDIR: &str = "DBGMON_WORKDIR";
pub const ENV_PTY_COLS: &str = "DBGMON_PTY_COLS";
pub const ENV_PTY_ROWS: &str = "DBGMON_PTY_ROWS";
pub const ENV_TRACE_JSON: &str = "DBGMON_TRACE_JSON";
