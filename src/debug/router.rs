/*!
 * Debug Event Router
 * State machine tying debugger events to the sampler and the history window
 *
 * States (derived from `SessionState`): Idle -> AwaitingProcess -> Attached <-> Paused,
 * and back to Idle on termination from anywhere.
 *
 * The router only toggles the sampler on a real run-state transition it has
 * tracked itself, so redundant stop/continue notifications never double-toggle.
 */

use super::adapter::AdapterRegistry;
use super::events::{DebugEvent, SessionStart};
use super::router_builder::RouterBuilder;
use super::session::{RouterState, SessionState};
use crate::core::types::{Generation, Pid, ThreadId};
use crate::monitoring::session_span;
use crate::presentation::PresentationBridge;
use crate::sampler::{
    SamplerConfig, SamplerEvent, SamplerEventSender, SamplerExit, SamplerLauncher, SamplerMessage,
};
use std::sync::Arc;
use tracing::{debug, info, trace, warn, Span};

/// Drives one session at a time from debugger and sampler events
pub struct DebugEventRouter {
    session: SessionState,
    span: Span,
    profiles: AdapterRegistry,
    sampler_config: SamplerConfig,
    launcher: Box<dyn SamplerLauncher>,
    bridge: Arc<dyn PresentationBridge>,
    sampler_events: SamplerEventSender,
    next_generation: Generation,
}

impl DebugEventRouter {
    pub fn builder(sampler_config: SamplerConfig) -> RouterBuilder {
        RouterBuilder::new(sampler_config)
    }

    pub(crate) fn from_parts(
        profiles: AdapterRegistry,
        sampler_config: SamplerConfig,
        launcher: Box<dyn SamplerLauncher>,
        bridge: Arc<dyn PresentationBridge>,
        sampler_events: SamplerEventSender,
    ) -> Self {
        Self {
            session: SessionState::idle(),
            span: Span::none(),
            profiles,
            sampler_config,
            launcher,
            bridge,
            sampler_events,
            next_generation: 1,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn state(&self) -> RouterState {
        self.session.state()
    }

    /// Apply one debugger event
    pub fn handle_debug_event(&mut self, event: DebugEvent) {
        let span = self.span.clone();
        let _entered = span.enter();
        trace!(kind = event.kind(), state = ?self.state(), "Debug event");

        match event {
            DebugEvent::SessionStarted(start) => self.on_session_started(start),
            DebugEvent::SessionTerminated => self.on_session_terminated(),
            DebugEvent::ActiveSessionChanged { name } => {
                debug!(name = ?name, "Active debug session changed");
            }
            DebugEvent::ProcessStarted { name, system_pid } => {
                self.on_process_started(&name, system_pid)
            }
            DebugEvent::Stopped { reason, thread_id } => {
                self.on_stopped(&reason, thread_id)
            }
            DebugEvent::Continued { success } => self.on_continued(success),
            DebugEvent::StepContinued { .. } => self.on_step_continued(),
        }
    }

    /// Apply one sampler event; output of a replaced sampler is dropped
    pub fn handle_sampler_message(&mut self, message: SamplerMessage) {
        let span = self.span.clone();
        let _entered = span.enter();

        if self.session.sampler_generation() != Some(message.generation) {
            trace!(generation = message.generation, "Dropping stale sampler event");
            return;
        }

        match message.event {
            SamplerEvent::Line(line) => self.on_sampler_line(&line),
            SamplerEvent::Exited(exit) => self.on_sampler_exit(exit),
        }
    }

    /// Terminate any sampler and return to Idle
    pub fn shutdown(&mut self) {
        if self.session.is_active() {
            info!("Router shutting down with an active session");
        }
        self.reset();
    }

    // =========================================================================
    // Debugger transitions
    // =========================================================================

    fn on_session_started(&mut self, start: SessionStart) {
        if self.session.is_active() {
            debug!(
                debug_type = ?start.debug_type,
                "Session already active, ignoring additional session start"
            );
            return;
        }

        let Some(profile) = self.profiles.resolve(start.debug_type.as_deref()).cloned() else {
            info!(
                debug_type = ?start.debug_type,
                "Unsupported debug type, session not monitored"
            );
            return;
        };

        self.session = SessionState::open(profile, start.name);
        self.span = session_span(
            self.session.session_id().unwrap_or_default(),
            self.session.debug_type().unwrap_or_default(),
        );
        {
            let _entered = self.span.enter();
            info!(name = %self.session.target_name(), "Debug session started");
        }

        if let Some(pid) = start.pid.filter(|pid| *pid != 0) {
            let name = self.session.target_name().to_string();
            self.session.set_target(&name, pid);
            self.try_spawn();
        }
    }

    fn on_process_started(&mut self, name: &str, pid: Pid) {
        if !self.session.is_active() {
            debug!(pid, "Process event outside a session, ignored");
            return;
        }
        if pid == 0 {
            debug!("Process event without a usable pid, ignored");
            return;
        }

        if self.session.has_sampler() && pid != self.session.target_pid() {
            warn!(
                pid,
                sampled_pid = self.session.target_pid(),
                "Process event for another pid while a sampler is attached, keeping the sampled pid"
            );
            return;
        }

        info!(name, pid, "Debug target identified");
        self.session.set_target(name, pid);
        self.try_spawn();
    }

    fn on_stopped(&mut self, reason: &str, thread_id: Option<ThreadId>) {
        if !self.session.is_active() || self.session.is_paused() {
            trace!(reason, "Stop ignored");
            return;
        }

        debug!(reason, thread_id = ?thread_id, "Target stopped");
        self.session.set_paused(true);
        self.toggle_sampler();
    }

    fn on_continued(&mut self, success: bool) {
        if !self.session.is_active() || !success || !self.session.is_paused() {
            trace!(success, "Continue ignored");
            return;
        }

        debug!("Target continued");
        self.session.set_paused(false);
        self.toggle_sampler();
    }

    fn on_step_continued(&mut self) {
        let Some(sampler) = self.session.sampler_mut() else {
            return;
        };
        if let Err(e) = sampler.signal_step() {
            debug!(error = %e, "Step marker not delivered");
        }
    }

    fn on_session_terminated(&mut self) {
        if self.session.is_active() {
            let duration_ms = self
                .session
                .opened_at()
                .and_then(|opened| opened.elapsed().ok())
                .map(|elapsed| elapsed.as_millis());
            info!(
                samples = self.session.history().len(),
                duration_ms = ?duration_ms,
                "Debug session terminated"
            );
        }
        self.reset();
    }

    // =========================================================================
    // Sampler events
    // =========================================================================

    fn on_sampler_line(&mut self, line: &str) {
        let sample = match self.session.parser().parse(line) {
            Ok(sample) => sample,
            Err(e) => {
                trace!(error = %e, line, "Discarding sampler line");
                return;
            }
        };

        self.session.record_sample(sample);
        self.bridge.post(self.session.snapshot());
    }

    fn on_sampler_exit(&mut self, exit: SamplerExit) {
        if exit.success() {
            info!(code = ?exit.code, "Sampler exited");
        } else {
            warn!(code = ?exit.code, signal = ?exit.signal, "Sampler exited unexpectedly");
        }

        if let Some(mut sampler) = self.session.take_sampler() {
            sampler.terminate();
        }
        self.session.record_exit(exit);
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Launch the sampler unless the pid is unknown or one is attached
    fn try_spawn(&mut self) {
        if !self.session.has_target() {
            return;
        }
        if self.session.has_sampler() {
            debug!(pid = self.session.target_pid(), "Sampler already attached");
            return;
        }
        let Some(profile) = self.session.profile() else {
            return;
        };

        let generation = self.next_generation;
        self.next_generation += 1;

        let request = self.sampler_config.request_for(
            self.session.target_pid(),
            &profile.sampler_args,
            profile.controls,
            generation,
        );

        match self.launcher.launch(request, self.sampler_events.clone()) {
            Ok(sampler) => {
                self.session.attach_sampler(sampler, generation);
                // Debugger already stopped the target before we attached
                if self.session.is_paused() {
                    self.toggle_sampler();
                }
            }
            Err(e) => {
                warn!(error = %e, pid = self.session.target_pid(), "Sampler spawn failed");
                self.session.record_spawn_error(e);
            }
        }
    }

    fn toggle_sampler(&mut self) {
        let Some(sampler) = self.session.sampler_mut() else {
            return;
        };
        if let Err(e) = sampler.signal_pause_toggle() {
            debug!(error = %e, "Pause toggle not delivered");
        }
    }

    fn reset(&mut self) {
        if let Some(mut sampler) = self.session.take_sampler() {
            sampler.terminate();
        }
        self.session = SessionState::idle();
        self.span = Span::none();
    }
}

impl Drop for DebugEventRouter {
    fn drop(&mut self) {
        if let Some(mut sampler) = self.session.take_sampler() {
            sampler.terminate();
        }
    }
}
