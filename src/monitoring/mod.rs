/*!
 * Monitoring
 * Structured tracing for the monitor itself
 */

mod tracer;

pub use tracer::{init_tracing, session_span};
