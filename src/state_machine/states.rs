use serde::{Deserialize, Serialize};
use std::fmt;

/// Booking wizard stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStage {
    /// Wizard is not shown; no session is active
    Closed,
    /// Step 1: party size, date and time
    CollectingSchedule,
    /// Step 2: contact details
    CollectingContact,
    /// Waiting on the submission gateway
    Submitting,
    /// Step 3: request accepted by the gateway
    Confirmed,
}

impl WizardStage {
    /// Only a confirmed request ends the flow successfully
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed)
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Check if the draft may be edited in this stage
    pub fn accepts_edits(&self) -> bool {
        matches!(self, Self::CollectingSchedule | Self::CollectingContact)
    }

    /// Check if a gateway call is outstanding
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// The step indicator shown to the guest; `Submitting` still shows step 2
    pub fn step_number(&self) -> Option<u8> {
        match self {
            Self::Closed => None,
            Self::CollectingSchedule => Some(1),
            Self::CollectingContact | Self::Submitting => Some(2),
            Self::Confirmed => Some(3),
        }
    }
}

impl fmt::Display for WizardStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::CollectingSchedule => write!(f, "collecting_schedule"),
            Self::CollectingContact => write!(f, "collecting_contact"),
            Self::Submitting => write!(f, "submitting"),
            Self::Confirmed => write!(f, "confirmed"),
        }
    }
}

impl std::str::FromStr for WizardStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "closed" => Ok(Self::Closed),
            "collecting_schedule" => Ok(Self::CollectingSchedule),
            "collecting_contact" => Ok(Self::CollectingContact),
            "submitting" => Ok(Self::Submitting),
            "confirmed" => Ok(Self::Confirmed),
            _ => Err(format!("Invalid wizard stage: {s}")),
        }
    }
}

impl Default for WizardStage {
    fn default() -> Self {
        Self::Closed
    }
}
