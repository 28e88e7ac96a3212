use serde::{Deserialize, Serialize};

use super::{PartySize, ReservationDraft};

/// Flat JSON body sent to the submission gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPayload {
    pub guests: PartySize,
    /// ISO 8601 date, `YYYY-MM-DD`
    pub date: String,
    /// 24-hour `HH:MM`
    pub time: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub special_requests: String,
    pub subject: String,
    #[serde(rename = "_replyto")]
    pub reply_to: String,
}

impl ReservationPayload {
    /// Build the wire payload. Returns `None` unless both date and time are set.
    pub fn from_draft(draft: &ReservationDraft) -> Option<Self> {
        let date = draft.date?.format("%Y-%m-%d").to_string();
        let time = draft.time?.to_string();
        let email = draft.email.trim().to_string();

        Some(Self {
            guests: draft.party_size,
            subject: format!(
                "Table Reservation - {} - {} at {}",
                draft.full_name(),
                date,
                time
            ),
            date,
            time,
            first_name: draft.first_name.trim().to_string(),
            last_name: draft.last_name.trim().to_string(),
            reply_to: email.clone(),
            email,
            phone: draft.phone.trim().to_string(),
            special_requests: draft.special_requests.clone(),
        })
    }
}
