/*!
 * Sampler Traits
 * Seams between the router and the OS-level sampler process
 */

use super::types::{LaunchRequest, SamplerEventSender};
use crate::core::errors::SamplerResult;
use crate::core::types::Pid;

/// Starts sampler processes
pub trait SamplerLauncher: Send {
    /// Spawn a sampler for `request.target_pid`
    ///
    /// Output lines and the exit notification are delivered on `events`,
    /// stamped with `request.generation`.
    fn launch(
        &self,
        request: LaunchRequest,
        events: SamplerEventSender,
    ) -> SamplerResult<Box<dyn SamplerControl>>;
}

/// Control surface of one running sampler
pub trait SamplerControl: Send {
    /// OS pid of the sampler itself
    fn os_pid(&self) -> Option<Pid>;

    /// Whether the child is still running
    fn is_alive(&self) -> bool;

    /// Ask the sampler to toggle between paused and sampling
    fn signal_pause_toggle(&mut self) -> SamplerResult<()>;

    /// Ask the sampler to record a step boundary
    fn signal_step(&mut self) -> SamplerResult<()>;

    /// Quit byte, then force kill, then release the handles
    ///
    /// Safe to call repeatedly and after the child already exited.
    fn terminate(&mut self);
}
