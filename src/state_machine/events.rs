use serde::{Deserialize, Serialize};

/// Events that drive booking wizard stage transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WizardEvent {
    /// Guest opened the reservation modal
    Open,
    /// Guest pressed "Continue" on the schedule step
    ContinueToContact,
    /// Guest pressed "Back" on the contact step
    Back,
    /// Guest pressed "Confirm Booking"
    Submit,
    /// Gateway acknowledged the request
    GatewayAccepted,
    /// Gateway call failed with the user-facing reason
    GatewayRejected(String),
    /// Guest dismissed the modal (close button, "Done", or backdrop)
    Close,
}

impl WizardEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::ContinueToContact => "continue_to_contact",
            Self::Back => "back",
            Self::Submit => "submit",
            Self::GatewayAccepted => "gateway_accepted",
            Self::GatewayRejected(_) => "gateway_rejected",
            Self::Close => "close",
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::GatewayRejected(reason) => Some(reason),
            _ => None,
        }
    }

    /// Events produced by the gateway rather than the guest
    pub fn is_gateway_result(&self) -> bool {
        matches!(self, Self::GatewayAccepted | Self::GatewayRejected(_))
    }

    pub fn rejected_with(reason: impl Into<String>) -> Self {
        Self::GatewayRejected(reason.into())
    }
}
