// Booking wizard state machine
//
// Stages, events, guards and post-transition actions for the three-step
// reservation flow, plus the `BookingWizard` handle that drives them.

pub mod actions;
pub mod errors;
pub mod events;
pub mod guards;
pub mod history;
pub mod outcome;
pub mod reset;
pub mod states;
pub mod wizard;

// Re-export main types for convenient access
pub use errors::{GuardError, StateMachineError, StateMachineResult};
pub use events::WizardEvent;
pub use history::TransitionRecord;
pub use outcome::{FailureNotice, SubmissionOutcome};
pub use states::WizardStage;
pub use wizard::{BookingWizard, WizardSettings};

// Common traits and utilities
pub use actions::StateAction;
pub use guards::{ContactCompleteGuard, ScheduleCompleteGuard, StateGuard, TransitionGuard};
