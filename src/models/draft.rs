use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{PartySize, TimeSlot};
use crate::validation::is_valid_email;

/// In-progress reservation data collected by the wizard
///
/// Owned by a single [`crate::state_machine::BookingWizard`]; callers only
/// ever see snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    pub party_size: PartySize,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub special_requests: String,
}

impl ReservationDraft {
    /// Step 1 is complete once both a date and a slot are chosen for an offered party size
    pub fn is_step1_valid(&self) -> bool {
        self.party_size.is_offered() && self.date.is_some() && self.time.is_some()
    }

    /// Step 2 is complete once a first name and a well-formed email are present
    pub fn is_step2_valid(&self) -> bool {
        !self.first_name.trim().is_empty() && is_valid_email(&self.email)
    }

    /// "First Last", without a trailing space when the last name is blank
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Apply the pre-seeded fields of `seed`, leaving the rest untouched
    pub fn apply_seed(&mut self, seed: &DraftSeed) {
        if let Some(party_size) = seed.party_size {
            self.party_size = party_size;
        }
        if let Some(date) = seed.date {
            self.date = Some(date);
        }
        if let Some(time) = seed.time {
            self.time = Some(time);
        }
    }
}

/// Optional values a caller may pre-fill when opening the wizard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftSeed {
    pub party_size: Option<PartySize>,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
}

/// What the confirmation step shows back to the guest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationSummary {
    pub party_size: PartySize,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub email: String,
}

impl ConfirmationSummary {
    /// Build from a draft that has a complete schedule
    pub fn from_draft(draft: &ReservationDraft) -> Option<Self> {
        Some(Self {
            party_size: draft.party_size,
            date: draft.date?,
            time: draft.time?,
            email: draft.email.trim().to_string(),
        })
    }
}

impl fmt::Display for ConfirmationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "We have received your reservation request for {} people on {} at {}.",
            self.party_size,
            self.date.format("%Y-%m-%d"),
            self.time
        )
    }
}
