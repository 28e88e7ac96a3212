//! # Reservation Models
//!
//! Value types for the table reservation flow: the fixed party-size and
//! slot offerings, the mutable draft, and the payload sent to the gateway.

pub mod draft;
pub mod party_size;
pub mod payload;
pub mod time_slot;

pub use draft::{ConfirmationSummary, DraftSeed, ReservationDraft};
pub use party_size::PartySize;
pub use payload::ReservationPayload;
pub use time_slot::{SlotGroup, TimeSlot};
