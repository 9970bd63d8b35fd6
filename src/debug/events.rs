/*!
 * Debug Events
 * The debugger notifications the router reacts to
 */

use crate::core::types::{Pid, ThreadId};
use serde::{Deserialize, Serialize};

/// Parameters known when a debug session starts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStart {
    /// Debugger backend, e.g. `go` or `cppdbg`
    #[serde(default)]
    pub debug_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Target pid when it is known up front (attach configurations)
    #[serde(default)]
    pub pid: Option<Pid>,
}

impl SessionStart {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_debug_type(mut self, debug_type: impl Into<String>) -> Self {
        self.debug_type = Some(debug_type.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_pid(mut self, pid: Pid) -> Self {
        self.pid = Some(pid);
        self
    }
}

/// Classified debugger event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugEvent {
    SessionStarted(SessionStart),
    SessionTerminated,
    ActiveSessionChanged { name: Option<String> },
    /// Adapter `process` event
    ProcessStarted { name: String, system_pid: Pid },
    /// Adapter `stopped` event
    Stopped {
        reason: String,
        thread_id: Option<ThreadId>,
    },
    /// Response to a `continue` request
    Continued { success: bool },
    /// Adapter `continued` event, sent when execution resumes after a step
    StepContinued { thread_id: Option<ThreadId> },
}

impl DebugEvent {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SessionStarted(_) => "session_started",
            Self::SessionTerminated => "session_terminated",
            Self::ActiveSessionChanged { .. } => "active_session_changed",
            Self::ProcessStarted { .. } => "process_started",
            Self::Stopped { .. } => "stopped",
            Self::Continued { .. } => "continued",
            Self::StepContinued { .. } => "step_continued",
        }
    }
}
