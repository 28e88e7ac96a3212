use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::ConfirmationSummary;

/// User-facing notice raised when a submission fails
///
/// Carries the gateway's reason (or a generic one) and the phone number the
/// guest can call instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureNotice {
    pub reason: String,
    pub fallback_phone: String,
}

impl FailureNotice {
    pub fn new(reason: impl Into<String>, fallback_phone: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            fallback_phone: fallback_phone.into(),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FailureNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. Please call us on {} to book your table.",
            self.reason.trim_end_matches('.'),
            self.fallback_phone
        )
    }
}

/// Result of a completed `submit_reservation` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Gateway accepted the request; the wizard is now `Confirmed`
    Confirmed(ConfirmationSummary),
    /// Gateway call failed; the wizard is back on the contact step with the draft intact
    Failed(FailureNotice),
    /// The wizard was closed while the request was in flight; the result was dropped
    Discarded,
}

impl SubmissionOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    pub fn failure(&self) -> Option<&FailureNotice> {
        match self {
            Self::Failed(notice) => Some(notice),
            _ => None,
        }
    }
}
