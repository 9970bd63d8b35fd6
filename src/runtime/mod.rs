/*!
 * Runtime
 * Single-writer event loop hosting the router
 */

mod service;

pub use service::{MonitorHandle, MonitorService};
