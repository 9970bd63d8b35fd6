/*!
 * Shared test fixtures
 * Recording sampler launcher and event helpers
 */

#![allow(dead_code)]

use dbgmon::core::types::{Generation, Pid};
use dbgmon::sampler::{
    LaunchRequest, SamplerConfig, SamplerControl, SamplerEventSender, SamplerExit,
    SamplerLauncher, SamplerMessage,
};
use dbgmon::{DebugEvent, SamplerError, SamplerResult, SessionStart};
use parking_lot::Mutex;
use std::sync::Arc;

/// What the router asked of the sampler
#[derive(Debug, Clone, Default)]
pub struct SamplerCalls {
    pub launches: Vec<LaunchRequest>,
    pub toggles: usize,
    pub steps: usize,
    pub terminates: usize,
}

#[derive(Default)]
struct Shared {
    calls: SamplerCalls,
    events: Option<(Generation, SamplerEventSender)>,
}

/// Launcher that records instead of spawning
#[derive(Clone, Default)]
pub struct FakeLauncher {
    shared: Arc<Mutex<Shared>>,
    fail: bool,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every launch fails with `SpawnFailed`
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> SamplerCalls {
        self.shared.lock().calls.clone()
    }

    /// Generation of the most recent launch
    pub fn generation(&self) -> Option<Generation> {
        self.shared.lock().events.as_ref().map(|(g, _)| *g)
    }

    /// Emit an output line as the most recently launched sampler
    pub fn emit_line(&self, line: &str) {
        let shared = self.shared.lock();
        if let Some((generation, tx)) = &shared.events {
            let _ = tx.send(SamplerMessage::line(*generation, line));
        }
    }

    /// Report an exit as the most recently launched sampler
    pub fn emit_exit(&self, exit: SamplerExit) {
        let shared = self.shared.lock();
        if let Some((generation, tx)) = &shared.events {
            let _ = tx.send(SamplerMessage::exited(*generation, exit));
        }
    }
}

impl SamplerLauncher for FakeLauncher {
    fn launch(
        &self,
        request: LaunchRequest,
        events: SamplerEventSender,
    ) -> SamplerResult<Box<dyn SamplerControl>> {
        let mut shared = self.shared.lock();
        if self.fail {
            return Err(SamplerError::SpawnFailed {
                executable: request.executable.display().to_string(),
                pid: request.target_pid,
                reason: "refused by test launcher".to_string(),
            });
        }

        shared.events = Some((request.generation, events));
        shared.calls.launches.push(request);
        Ok(Box::new(FakeSampler {
            shared: Arc::clone(&self.shared),
            alive: true,
        }))
    }
}

struct FakeSampler {
    shared: Arc<Mutex<Shared>>,
    alive: bool,
}

impl SamplerControl for FakeSampler {
    fn os_pid(&self) -> Option<Pid> {
        Some(4242)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn signal_pause_toggle(&mut self) -> SamplerResult<()> {
        if !self.alive {
            return Err(SamplerError::NotRunning);
        }
        self.shared.lock().calls.toggles += 1;
        Ok(())
    }

    fn signal_step(&mut self) -> SamplerResult<()> {
        if !self.alive {
            return Err(SamplerError::NotRunning);
        }
        self.shared.lock().calls.steps += 1;
        Ok(())
    }

    fn terminate(&mut self) {
        if self.alive {
            self.alive = false;
            self.shared.lock().calls.terminates += 1;
        }
    }
}

pub fn sampler_config() -> SamplerConfig {
    SamplerConfig::new("/opt/sampler")
}

pub fn session_started(debug_type: &str) -> DebugEvent {
    DebugEvent::SessionStarted(
        SessionStart::new()
            .with_debug_type(debug_type)
            .with_name("app"),
    )
}

pub fn process_started(pid: Pid) -> DebugEvent {
    DebugEvent::ProcessStarted {
        name: "app".to_string(),
        system_pid: pid,
    }
}

pub fn stopped() -> DebugEvent {
    DebugEvent::Stopped {
        reason: "breakpoint".to_string(),
        thread_id: Some(1),
    }
}

pub fn continued(success: bool) -> DebugEvent {
    DebugEvent::Continued { success }
}
