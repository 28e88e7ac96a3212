#![allow(clippy::doc_markdown)] // Allow technical terms like FormSubmit, JSON in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Reservation Core
//!
//! Headless core of a restaurant's table reservation wizard.
//!
//! ## Overview
//!
//! A guest moves through three steps: pick a party size, date and dining
//! slot; enter contact details; see a confirmation. The completed request is
//! handed to an external form relay over HTTPS. There is no availability
//! check and no payment: the restaurant confirms by email or phone.
//!
//! ## Module Organization
//!
//! - [`models`] - Draft, party size, time slots and the wire payload
//! - [`state_machine`] - The `BookingWizard` and its stage transitions
//! - [`gateway`] - Submission gateway trait and the HTTP implementation
//! - [`config`] - Configuration loading and validation
//! - [`logging`] - Structured logging setup
//! - [`events`] - Lifecycle event publishing
//! - [`validation`] - Input checks shared by the models and the wizard
//! - [`error`] - Crate-level error type
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reservation_core::config::ReservationConfig;
//! use reservation_core::state_machine::{BookingWizard, SubmissionOutcome};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReservationConfig::load()?;
//! let wizard = BookingWizard::from_config(&config)?;
//!
//! wizard.open()?;
//! wizard.set_date_str("2026-12-24")?;
//! wizard.set_time_str("19:00")?;
//! wizard.continue_to_contact()?;
//! wizard.set_first_name("Jane")?;
//! wizard.set_email("jane@example.com")?;
//!
//! match wizard.submit_reservation().await? {
//!     SubmissionOutcome::Confirmed(summary) => println!("{summary}"),
//!     SubmissionOutcome::Failed(notice) => eprintln!("{notice}"),
//!     SubmissionOutcome::Discarded => {}
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod state_machine;
pub mod validation;

pub use config::{ConfigurationError, GatewayConfig, LoggingConfig, ReservationConfig, WizardConfig};
pub use constants::events as lifecycle_events;
pub use error::{ReservationError, Result};
pub use events::{EventPublisher, PublishedEvent};
pub use gateway::{
    interpret_response, GatewayAck, GatewayError, HttpSubmissionGateway, SubmissionGateway,
};
pub use models::{
    ConfirmationSummary, DraftSeed, PartySize, ReservationDraft, ReservationPayload, SlotGroup,
    TimeSlot,
};
pub use state_machine::{
    BookingWizard, FailureNotice, StateMachineError, SubmissionOutcome, WizardEvent,
    WizardSettings, WizardStage,
};
pub use validation::ValidationError;
