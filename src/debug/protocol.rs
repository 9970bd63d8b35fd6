/*!
 * Host Protocol Decoding
 * Maps newline-delimited JSON host messages onto debug events
 *
 * Two families share one stream:
 * - lifecycle notifications from the host: `sessionStarted`, `sessionTerminated`,
 *   `activeSessionChanged`
 * - raw debug adapter traffic: `event` and `response` messages
 *
 * Anything unrecognized decodes to `None` and is ignored by callers.
 */

use super::events::{DebugEvent, SessionStart};
use crate::core::errors::{ProtocolError, ProtocolResult};
use crate::core::types::{Pid, ThreadId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessBody {
    name: String,
    #[serde(default)]
    system_process_id: Option<Pid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoppedBody {
    #[serde(default = "unknown_reason")]
    reason: String,
    #[serde(default)]
    thread_id: Option<ThreadId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContinuedBody {
    #[serde(default)]
    thread_id: Option<ThreadId>,
}

#[derive(Debug, Default, Deserialize)]
struct ActiveSessionBody {
    #[serde(default)]
    name: Option<String>,
}

fn unknown_reason() -> String {
    "unknown".to_string()
}

/// Decode one input line
pub fn decode_line(line: &str) -> ProtocolResult<Option<DebugEvent>> {
    let value: Value =
        serde_json::from_str(line).map_err(|e| ProtocolError::InvalidJson(e.to_string()))?;
    decode_message(&value)
}

/// Decode an already parsed message
pub fn decode_message(message: &Value) -> ProtocolResult<Option<DebugEvent>> {
    let kind = message
        .get("type")
        .and_then(Value::as_str)
        .ok_or(ProtocolError::MissingType)?;

    match kind {
        "sessionStarted" => {
            let start: SessionStart = from_value(kind, message.clone())?;
            Ok(Some(DebugEvent::SessionStarted(start)))
        }
        "sessionTerminated" => Ok(Some(DebugEvent::SessionTerminated)),
        "activeSessionChanged" => {
            let body: ActiveSessionBody = from_value(kind, message.clone())?;
            Ok(Some(DebugEvent::ActiveSessionChanged { name: body.name }))
        }
        "event" => decode_adapter_event(message),
        "response" => decode_adapter_response(message),
        _ => Ok(None),
    }
}

fn decode_adapter_event(message: &Value) -> ProtocolResult<Option<DebugEvent>> {
    let Some(event) = message.get("event").and_then(Value::as_str) else {
        return Ok(None);
    };

    match event {
        "process" => {
            let body: ProcessBody = from_value(event, body_of(message))?;
            let system_pid = body.system_process_id.ok_or_else(|| ProtocolError::Malformed {
                message: event.to_string(),
                reason: "missing systemProcessId".to_string(),
            })?;
            Ok(Some(DebugEvent::ProcessStarted {
                name: body.name,
                system_pid,
            }))
        }
        "stopped" => {
            let body: StoppedBody = from_value(event, body_of(message))?;
            Ok(Some(DebugEvent::Stopped {
                reason: body.reason,
                thread_id: body.thread_id,
            }))
        }
        "continued" => {
            let body: ContinuedBody = from_value(event, body_of(message))?;
            Ok(Some(DebugEvent::StepContinued {
                thread_id: body.thread_id,
            }))
        }
        _ => Ok(None),
    }
}

fn decode_adapter_response(message: &Value) -> ProtocolResult<Option<DebugEvent>> {
    match message.get("command").and_then(Value::as_str) {
        Some("continue") => {
            let success = message
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            Ok(Some(DebugEvent::Continued { success }))
        }
        _ => Ok(None),
    }
}

fn body_of(message: &Value) -> Value {
    match message.get("body") {
        Some(body) if body.is_object() => body.clone(),
        _ => Value::Object(Default::default()),
    }
}

fn from_value<T: DeserializeOwned>(message: &str, value: Value) -> ProtocolResult<T> {
    serde_json::from_value(value).map_err(|e| ProtocolError::Malformed {
        message: message.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_event_is_ignored() {
        let line = r#"{"type":"event","event":"output","body":{"output":"hi"}}"#;
        assert_eq!(decode_line(line).unwrap(), None);
    }

    #[test]
    fn test_requests_are_ignored() {
        let line = r#"{"type":"request","command":"continue","seq":3}"#;
        assert_eq!(decode_line(line).unwrap(), None);
    }

    #[test]
    fn test_stopped_without_body_uses_defaults() {
        let line = r#"{"type":"event","event":"stopped"}"#;
        assert_eq!(
            decode_line(line).unwrap(),
            Some(DebugEvent::Stopped {
                reason: "unknown".to_string(),
                thread_id: None
            })
        );
    }

    #[test]
    fn test_missing_type() {
        assert_eq!(decode_line(r#"{"event":"stopped"}"#), Err(ProtocolError::MissingType));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            decode_line("not json"),
            Err(ProtocolError::InvalidJson(_))
        ));
    }
}
