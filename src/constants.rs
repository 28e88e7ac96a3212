//! # Reservation Constants
//!
//! Fixed offerings and operational defaults for the table reservation flow.
//! The slot list and party-size buckets are static: the wizard does not
//! consult any availability service.

use std::time::Duration;

/// Wizard lifecycle events published through [`crate::events::EventPublisher`]
pub mod events {
    pub const RESERVATION_OPENED: &str = "reservation.opened";
    pub const RESERVATION_SCHEDULE_COMPLETED: &str = "reservation.schedule_completed";
    pub const RESERVATION_RETURNED_TO_SCHEDULE: &str = "reservation.returned_to_schedule";
    pub const RESERVATION_SUBMISSION_REQUESTED: &str = "reservation.submission_requested";
    pub const RESERVATION_CONFIRMED: &str = "reservation.confirmed";
    pub const RESERVATION_SUBMISSION_FAILED: &str = "reservation.submission_failed";
    pub const RESERVATION_CLOSED: &str = "reservation.closed";
    pub const RESERVATION_RESET: &str = "reservation.reset";
    pub const RESERVATION_STALE_RESPONSE_DISCARDED: &str = "reservation.stale_response_discarded";
}

/// Offered dining slots as (hour, minute), in display order
pub const OFFERED_SLOTS: [(u32, u32); 10] = [
    (12, 0),
    (12, 30),
    (13, 0),
    (13, 30),
    (18, 0),
    (18, 30),
    (19, 0),
    (19, 30),
    (20, 0),
    (20, 30),
];

/// Slots strictly before this hour are lunch
pub const LUNCH_CUTOFF_HOUR: u32 = 15;

/// Largest party size bookable as an exact count; anything larger is "8+"
pub const MAX_EXACT_PARTY_SIZE: u8 = 7;

pub const DEFAULT_PARTY_SIZE: u8 = 2;

pub const OVERFLOW_PARTY_LABEL: &str = "8+";

pub mod system {
    /// Generic failure reason when the gateway supplies none
    pub const GENERIC_SUBMISSION_FAILURE: &str = "We couldn't send your reservation request";

    pub const DEFAULT_FALLBACK_PHONE: &str = "023 8251 5195";

    pub const DEFAULT_GATEWAY_ENDPOINT: &str = "https://formsubmit.co/ajax/hello@theshoeinn.co.uk";

    pub const DEFAULT_GATEWAY_TIMEOUT_MS: u64 = 20_000;
    pub const MIN_GATEWAY_TIMEOUT_MS: u64 = 1_000;
    pub const MAX_GATEWAY_TIMEOUT_MS: u64 = 120_000;

    /// Matches the closing animation of the reservation modal
    pub const DEFAULT_RESET_DELAY_MS: u64 = 500;
    pub const MAX_RESET_DELAY_MS: u64 = 10_000;

    pub const DEFAULT_EVENT_CAPACITY: usize = 64;

    pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";
}

pub fn default_reset_delay() -> Duration {
    Duration::from_millis(system::DEFAULT_RESET_DELAY_MS)
}

pub fn default_submission_timeout() -> Duration {
    Duration::from_millis(system::DEFAULT_GATEWAY_TIMEOUT_MS)
}
