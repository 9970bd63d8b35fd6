/*!
 * Sampler Module
 * Lifecycle of the companion sampler process attached to a pseudo-terminal
 */

pub mod process;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use process::{PtyLauncher, SamplerProcess};
pub use traits::{SamplerControl, SamplerLauncher};
pub use types::{
    ControlBytes, LaunchRequest, SamplerConfig, SamplerEvent, SamplerEventSender, SamplerExit,
    SamplerMessage, TerminalSize,
};
