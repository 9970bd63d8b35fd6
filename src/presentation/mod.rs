/*!
 * Presentation Boundary
 * Update payloads and the bridges that carry them to a renderer
 */

mod bridge;
mod types;

pub use bridge::{ChannelBridge, PresentationBridge, SnapshotBridge};
pub use types::UsageUpdate;

#[cfg(test)]
pub use bridge::MockPresentationBridge;
