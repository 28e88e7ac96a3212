//! # Gateway Error Types

use thiserror::Error;

/// Gateway operation result type
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Ways a submission can fail to reach, or be accepted by, the form relay
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway did not respond within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Gateway rejected the request with HTTP {status}")]
    Rejected { status: u16, reason: Option<String> },

    #[error("Gateway returned an unreadable response (HTTP {status}): {reason}")]
    MalformedResponse { status: u16, reason: String },

    #[error("Network error contacting gateway: {0}")]
    Network(String),

    #[error("Gateway configuration error: {0}")]
    Configuration(String),
}

impl GatewayError {
    pub fn rejected(status: u16, reason: Option<String>) -> Self {
        Self::Rejected { status, reason }
    }

    /// Reason supplied by the relay itself, suitable for showing to a guest
    pub fn user_reason(&self) -> Option<&str> {
        match self {
            Self::Rejected {
                reason: Some(reason),
                ..
            } if !reason.trim().is_empty() => Some(reason.trim()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Http(err) => err.is_timeout(),
            _ => false,
        }
    }

    /// HTTP status of the relay response, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::MalformedResponse { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
