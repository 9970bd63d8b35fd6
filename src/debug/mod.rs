/*!
 * Debug Module
 * Debugger event classification and the session-driven sampling router
 */

pub mod adapter;
pub mod events;
pub mod protocol;
pub mod router;
pub mod router_builder;
pub mod session;

// Re-export for convenience
pub use adapter::{AdapterProfile, AdapterRegistry};
pub use events::{DebugEvent, SessionStart};
pub use protocol::{decode_line, decode_message};
pub use router::DebugEventRouter;
pub use router_builder::RouterBuilder;
pub use session::{RouterState, SessionState};
