//! Interpretation of form-relay responses.
//!
//! Any 2xx status with a JSON body counts as accepted. Everything else is a
//! failure, carrying the relay's `error` field when it sends one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{GatewayError, GatewayResult};

/// Acknowledgement returned by the relay for an accepted request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayAck {
    pub status: u16,
    pub body: Value,
}

impl GatewayAck {
    /// Relay-supplied message, if any
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }
}

pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Turn a raw status and body into an ack or a gateway error
pub fn interpret_response(status: u16, body: &str) -> GatewayResult<GatewayAck> {
    if is_success_status(status) {
        return serde_json::from_str::<Value>(body)
            .map(|body| GatewayAck { status, body })
            .map_err(|e| GatewayError::MalformedResponse {
                status,
                reason: e.to_string(),
            });
    }

    Err(GatewayError::rejected(status, extract_error_reason(body)))
}

fn extract_error_reason(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .map(str::to_string)
}
