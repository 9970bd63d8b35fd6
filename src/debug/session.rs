/*!
 * Session State
 * Everything known about the current debug target
 *
 * Exactly one instance is live. It is never cleared field by field: a
 * terminated session is replaced by `SessionState::idle()`.
 */

use super::adapter::AdapterProfile;
use crate::core::errors::SamplerError;
use crate::core::types::{Generation, Pid, Timestamp};
use crate::presentation::UsageUpdate;
use crate::sampler::{SamplerControl, SamplerExit};
use crate::telemetry::{SampleLineParser, UsageHistory, UsageSample};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// Router state derived from the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouterState {
    /// No debug session
    Idle,
    /// Session running, no sampler attached (pid unknown or spawn failed)
    AwaitingProcess,
    /// Sampler attached and target running
    Attached,
    /// Sampler attached and target stopped in the debugger
    Paused,
}

/// The record for the current debug target
pub struct SessionState {
    session_id: Option<Uuid>,
    profile: Option<AdapterProfile>,
    parser: SampleLineParser,
    opened_at: Option<SystemTime>,
    target_name: String,
    target_pid: Pid,
    paused: bool,
    started_at: Option<Timestamp>,
    sampler: Option<Box<dyn SamplerControl>>,
    sampler_generation: Option<Generation>,
    history: UsageHistory,
    spawn_error: Option<SamplerError>,
    last_exit: Option<SamplerExit>,
}

impl SessionState {
    /// The empty, inactive session
    pub fn idle() -> Self {
        Self {
            session_id: None,
            profile: None,
            parser: SampleLineParser::new(),
            opened_at: None,
            target_name: String::new(),
            target_pid: 0,
            paused: false,
            started_at: None,
            sampler: None,
            sampler_generation: None,
            history: UsageHistory::new(),
            spawn_error: None,
            last_exit: None,
        }
    }

    /// A fresh active session driven by `profile`
    pub fn open(profile: AdapterProfile, name: Option<String>) -> Self {
        Self {
            session_id: Some(Uuid::new_v4()),
            parser: profile.parser(),
            profile: Some(profile),
            opened_at: Some(SystemTime::now()),
            target_name: name.unwrap_or_default(),
            ..Self::idle()
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn state(&self) -> RouterState {
        match (self.is_active(), self.sampler.is_some(), self.paused) {
            (false, _, _) => RouterState::Idle,
            (true, false, _) => RouterState::AwaitingProcess,
            (true, true, false) => RouterState::Attached,
            (true, true, true) => RouterState::Paused,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.session_id.is_some()
    }

    #[inline]
    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn profile(&self) -> Option<&AdapterProfile> {
        self.profile.as_ref()
    }

    pub fn debug_type(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.debug_type.as_str())
    }

    #[inline]
    pub fn parser(&self) -> &SampleLineParser {
        &self.parser
    }

    /// Wall-clock time the session was opened, `None` when idle
    pub fn opened_at(&self) -> Option<SystemTime> {
        self.opened_at
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// `0` until the debugger reports the target
    #[inline]
    pub fn target_pid(&self) -> Pid {
        self.target_pid
    }

    #[inline]
    pub fn has_target(&self) -> bool {
        self.target_pid != 0
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Time origin for chart labels: the first sample's timestamp
    pub fn started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    #[inline]
    pub fn has_sampler(&self) -> bool {
        self.sampler.is_some()
    }

    /// Generation whose output this session accepts
    pub fn sampler_generation(&self) -> Option<Generation> {
        self.sampler_generation
    }

    pub fn history(&self) -> &UsageHistory {
        &self.history
    }

    pub fn spawn_error(&self) -> Option<&SamplerError> {
        self.spawn_error.as_ref()
    }

    pub fn last_exit(&self) -> Option<&SamplerExit> {
        self.last_exit.as_ref()
    }

    /// Full snapshot for the presentation boundary
    pub fn snapshot(&self) -> UsageUpdate {
        UsageUpdate::from_history(
            &self.target_name,
            self.target_pid,
            self.started_at.unwrap_or_default(),
            &self.history,
        )
    }

    // =========================================================================
    // Mutations (router only)
    // =========================================================================

    pub(crate) fn set_target(&mut self, name: &str, pid: Pid) {
        if !name.is_empty() {
            self.target_name = name.to_string();
        }
        self.target_pid = pid;
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub(crate) fn sampler_mut(&mut self) -> Option<&mut (dyn SamplerControl + 'static)> {
        self.sampler.as_deref_mut()
    }

    pub(crate) fn attach_sampler(&mut self, sampler: Box<dyn SamplerControl>, generation: Generation) {
        self.sampler = Some(sampler);
        self.sampler_generation = Some(generation);
        self.spawn_error = None;
    }

    pub(crate) fn take_sampler(&mut self) -> Option<Box<dyn SamplerControl>> {
        self.sampler.take()
    }

    pub(crate) fn record_spawn_error(&mut self, error: SamplerError) {
        self.spawn_error = Some(error);
    }

    pub(crate) fn record_exit(&mut self, exit: SamplerExit) {
        self.last_exit = Some(exit);
    }

    pub(crate) fn record_sample(&mut self, sample: UsageSample) {
        if self.started_at.is_none() {
            self.started_at = Some(sample.timestamp());
        }
        self.history.append(sample);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::idle()
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("session_id", &self.session_id)
            .field("debug_type", &self.debug_type())
            .field("target_name", &self.target_name)
            .field("target_pid", &self.target_pid)
            .field("paused", &self.paused)
            .field("started_at", &self.started_at)
            .field("has_sampler", &self.has_sampler())
            .field("sampler_generation", &self.sampler_generation)
            .field("samples", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_session_is_empty() {
        let session = SessionState::idle();
        assert_eq!(session.state(), RouterState::Idle);
        assert_eq!(session.target_pid(), 0);
        assert!(session.history().is_empty());
        assert!(session.snapshot().is_empty());
    }

    #[test]
    fn test_open_session_awaits_process() {
        let session = SessionState::open(AdapterProfile::cppdbg(), Some("app".to_string()));
        assert_eq!(session.state(), RouterState::AwaitingProcess);
        assert_eq!(session.debug_type(), Some("cppdbg"));
        assert_eq!(session.target_name(), "app");
        assert!(session.session_id().is_some());
        assert!(session.opened_at().is_some());
        assert!(SessionState::idle().opened_at().is_none());
    }

    #[test]
    fn test_first_sample_sets_origin() {
        let mut session = SessionState::open(AdapterProfile::cppdbg(), None);
        session.set_target("app", 42);
        session.record_sample(UsageSample::new(5000, 1.0, 1.0));
        session.record_sample(UsageSample::new(6000, 1.0, 1.0));

        assert_eq!(session.started_at(), Some(5000));
        assert_eq!(session.snapshot().labels, vec![0.0, 1.0]);
    }

    #[test]
    fn test_set_target_keeps_name_when_empty() {
        let mut session = SessionState::open(AdapterProfile::go(), Some("launch".to_string()));
        session.set_target("", 7);
        assert_eq!(session.target_name(), "launch");
        assert!(session.has_target());
    }
}
