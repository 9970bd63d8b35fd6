/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use super::types::Pid;
use miette::Diagnostic;
use thiserror::Error;

/// Sampler operation result
pub type SamplerResult<T> = Result<T, SamplerError>;

/// Sample line parse result
pub type ParseResult<T> = Result<T, SampleParseError>;

/// Host message decode result
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Configuration result
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while launching or driving the sampler process
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum SamplerError {
    #[error("No target process id is known yet")]
    #[diagnostic(
        code(sampler::no_target),
        help("The sampler is only launched after the debugger reports the target pid.")
    )]
    NoTarget,

    #[error("Failed to spawn sampler '{executable}' for pid {pid}: {reason}")]
    #[diagnostic(
        code(sampler::spawn_failed),
        help("Check that the sampler path exists and is executable (DBGMON_SAMPLER_PATH).")
    )]
    SpawnFailed {
        executable: String,
        pid: Pid,
        reason: String,
    },

    #[error("Failed to open pseudo-terminal: {0}")]
    #[diagnostic(code(sampler::pty_failed))]
    PtyFailed(String),

    #[error("Failed to write control byte {byte:#04x}: {reason}")]
    #[diagnostic(
        code(sampler::control_write_failed),
        help("The sampler has probably exited already.")
    )]
    ControlWriteFailed { byte: u8, reason: String },

    #[error("Sampler is not running")]
    #[diagnostic(code(sampler::not_running))]
    NotRunning,
}

/// Reasons a sampler output line is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum SampleParseError {
    #[error("Expected at least {expected} fields, found {found}")]
    #[diagnostic(code(parse::too_few_fields))]
    TooFewFields { expected: usize, found: usize },

    #[error("Invalid timestamp: {0}")]
    #[diagnostic(code(parse::invalid_timestamp))]
    InvalidTimestamp(String),

    #[error("Invalid cpu reading: {0}")]
    #[diagnostic(code(parse::invalid_cpu))]
    InvalidCpu(String),

    #[error("Invalid memory reading: {0}")]
    #[diagnostic(code(parse::invalid_memory))]
    InvalidMemory(String),
}

/// Errors decoding host messages into debug events
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ProtocolError {
    #[error("Invalid JSON: {0}")]
    #[diagnostic(
        code(protocol::invalid_json),
        help("Each input line must be one JSON object.")
    )]
    InvalidJson(String),

    #[error("Message has no 'type' field")]
    #[diagnostic(code(protocol::missing_type))]
    MissingType,

    #[error("Malformed '{message}' message: {reason}")]
    #[diagnostic(code(protocol::malformed))]
    Malformed { message: String, reason: String },
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    #[diagnostic(
        code(config::missing),
        help("Set the environment variable before starting the monitor.")
    )]
    Missing(&'static str),

    #[error("Invalid value for {key}: '{value}'")]
    #[diagnostic(code(config::invalid_value))]
    InvalidValue { key: &'static str, value: String },
}
