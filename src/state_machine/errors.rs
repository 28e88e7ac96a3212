use thiserror::Error;

use super::states::WizardStage;
use crate::validation::ValidationError;

/// Error types for booking wizard operations
///
/// None of these change the wizard stage: a refused operation leaves the
/// wizard exactly where it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateMachineError {
    #[error("Guard condition failed: {0}")]
    GuardFailed(#[from] GuardError),

    #[error("Invalid state transition from {from} on {event}")]
    InvalidTransition { from: WizardStage, event: String },

    #[error("Draft cannot be edited while the wizard is {stage}")]
    DraftLocked { stage: WizardStage },

    #[error("A reservation request is already being submitted")]
    SubmissionInProgress,

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

/// Step-completion preconditions that were not met
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    #[error("Schedule incomplete: {missing} not selected")]
    ScheduleIncomplete { missing: String },

    #[error("Party size {value} is not an offered option")]
    InvalidPartySize { value: String },

    #[error("First name is required")]
    MissingFirstName,

    #[error("Email address is required")]
    MissingEmail,

    #[error("Email address {email:?} is not valid")]
    InvalidEmail { email: String },

    #[error("Business rule violation: {rule}")]
    BusinessRuleViolation { rule: String },
}

pub type StateMachineResult<T> = Result<T, StateMachineError>;
pub type GuardResult<T> = Result<T, GuardError>;

/// Helper function to create business rule violations
pub fn business_rule_violation(rule: impl Into<String>) -> GuardError {
    GuardError::BusinessRuleViolation { rule: rule.into() }
}

pub fn invalid_transition(from: WizardStage, event: impl Into<String>) -> StateMachineError {
    StateMachineError::InvalidTransition {
        from,
        event: event.into(),
    }
}
