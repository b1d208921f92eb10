//! Interpretation of the backend JSON envelope.
//!
//! The body is parsed before the HTTP status is looked at, because the backend
//! reports failures as `{"status": "error", "detail": "..."}` on any status code.

use serde_json::Value;

use super::TransportError;

pub const STATUS_OK: &str = "ok";

/// Turns a raw backend answer into the ok payload or a `TransportError`.
///
/// Message precedence: unparseable body, then non-2xx (`detail` or
/// `Server error: <status>`), then a non-ok status field (`detail` or `failure_label`).
pub fn interpret(status: u16, body: &str, failure_label: &str) -> Result<Value, TransportError> {
    let payload: Value =
        serde_json::from_str(body).map_err(|e| TransportError::InvalidBody(e.to_string()))?;

    if !(200..300).contains(&status) {
        return Err(TransportError::Server {
            status,
            message: detail(&payload).unwrap_or_else(|| format!("Server error: {status}")),
        });
    }

    match payload.get("status").and_then(Value::as_str) {
        Some(STATUS_OK) => Ok(payload),
        _ => Err(TransportError::Rejected(
            detail(&payload).unwrap_or_else(|| failure_label.to_string()),
        )),
    }
}

/// The `detail` field as display text. Blank strings and nulls count as absent.
fn detail(payload: &Value) -> Option<String> {
    match payload.get("detail")? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        // e.g. validation error lists
        other => Some(other.to_string()),
    }
}
