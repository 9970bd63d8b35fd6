/*!
 * Sampler Types
 * Launch configuration, control bytes and output events
 */

use crate::core::limits::{
    DEFAULT_PAUSE_TOGGLE_BYTE, DEFAULT_PID_FLAG, DEFAULT_PTY_COLS, DEFAULT_PTY_ROWS,
    DEFAULT_QUIT_BYTE, DEFAULT_STEP_BYTE,
};
use crate::core::types::{Generation, Pid};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Single bytes understood by the sampler on its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ControlBytes {
    pub quit: u8,
    pub pause_toggle: u8,
    pub step: u8,
}

impl Default for ControlBytes {
    fn default() -> Self {
        Self {
            quit: DEFAULT_QUIT_BYTE,
            pause_toggle: DEFAULT_PAUSE_TOGGLE_BYTE,
            step: DEFAULT_STEP_BYTE,
        }
    }
}

/// Nominal terminal geometry handed to the pty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSize {
    pub cols: u16,
    pub rows: u16,
}

impl Default for TerminalSize {
    fn default() -> Self {
        Self {
            cols: DEFAULT_PTY_COLS,
            rows: DEFAULT_PTY_ROWS,
        }
    }
}

/// Where and how to start the sampler executable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SamplerConfig {
    pub executable: PathBuf,
    pub pid_flag: String,
    pub working_dir: Option<PathBuf>,
    pub env_vars: Vec<(String, String)>,
    pub terminal: TerminalSize,
}

impl SamplerConfig {
    #[inline]
    #[must_use]
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            pid_flag: DEFAULT_PID_FLAG.to_string(),
            working_dir: None,
            env_vars: vec![],
            terminal: TerminalSize::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    #[inline]
    #[must_use]
    pub fn with_terminal(mut self, terminal: TerminalSize) -> Self {
        self.terminal = terminal;
        self
    }

    /// Build the launch request for one target
    ///
    /// Command line: `<executable> <pid_flag> <pid> [extra_args...]`
    pub fn request_for(
        &self,
        target_pid: Pid,
        extra_args: &[String],
        controls: ControlBytes,
        generation: Generation,
    ) -> LaunchRequest {
        let mut args = Vec::with_capacity(extra_args.len() + 2);
        args.push(self.pid_flag.clone());
        args.push(target_pid.to_string());
        args.extend(extra_args.iter().cloned());

        LaunchRequest {
            executable: self.executable.clone(),
            target_pid,
            args,
            working_dir: self.working_dir.clone(),
            env_vars: self.env_vars.clone(),
            terminal: self.terminal,
            controls,
            generation,
        }
    }
}

/// Fully resolved parameters for one sampler spawn
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRequest {
    pub executable: PathBuf,
    pub target_pid: Pid,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    /// Added on top of the inherited environment
    pub env_vars: Vec<(String, String)>,
    pub terminal: TerminalSize,
    pub controls: ControlBytes,
    pub generation: Generation,
}

/// How the sampler ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerExit {
    pub code: Option<u32>,
    pub signal: Option<String>,
}

impl SamplerExit {
    #[inline]
    pub fn success(&self) -> bool {
        self.code == Some(0) && self.signal.is_none()
    }
}

/// Something the sampler produced
#[derive(Debug, Clone, PartialEq)]
pub enum SamplerEvent {
    /// One output line, line terminator stripped
    Line(String),
    /// The child terminated; sent once
    Exited(SamplerExit),
}

/// Sampler event stamped with the instance that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerMessage {
    pub generation: Generation,
    pub event: SamplerEvent,
}

impl SamplerMessage {
    #[inline]
    pub fn line(generation: Generation, line: impl Into<String>) -> Self {
        Self {
            generation,
            event: SamplerEvent::Line(line.into()),
        }
    }

    #[inline]
    pub fn exited(generation: Generation, exit: SamplerExit) -> Self {
        Self {
            generation,
            event: SamplerEvent::Exited(exit),
        }
    }
}

/// Queue feeding sampler output into the single-writer loop
pub type SamplerEventSender = mpsc::UnboundedSender<SamplerMessage>;
