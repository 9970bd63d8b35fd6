/*!
 * dbgmon
 * Debug-session-driven CPU/memory sampling controller
 *
 * Watches a debugger's event stream, runs a companion sampler against the
 * debug target on a pseudo-terminal, and keeps a sliding window of its
 * readings for live charting.
 */

pub mod config;
pub mod core;
pub mod debug;
pub mod monitoring;
pub mod presentation;
pub mod runtime;
pub mod sampler;
pub mod telemetry;

// Re-exports
pub use crate::core::errors::*;
pub use config::MonitorConfig;
pub use debug::{
    decode_line, AdapterProfile, AdapterRegistry, DebugEvent, DebugEventRouter, RouterBuilder,
    RouterState, SessionStart, SessionState,
};
pub use monitoring::init_tracing;
pub use presentation::{ChannelBridge, PresentationBridge, SnapshotBridge, UsageUpdate};
pub use runtime::{MonitorHandle, MonitorService};
pub use sampler::{PtyLauncher, SamplerConfig, SamplerControl, SamplerLauncher, SamplerProcess};
pub use telemetry::{SampleLineParser, UsageHistory, UsageSample};
