use thiserror::Error;

use crate::config::ConfigurationError;
use crate::gateway::GatewayError;
use crate::state_machine::errors::{GuardError, StateMachineError};
use crate::validation::ValidationError;

/// Crate-level error covering every failure the reservation core can surface
#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("State machine error: {0}")]
    StateMachine(#[from] StateMachineError),

    #[error("Guard error: {0}")]
    Guard(#[from] GuardError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReservationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts() {
        let err: ReservationError = ValidationError::InvalidEmail {
            email: "nobody".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("Validation error:"));
        assert!(err.to_string().contains("nobody"));
    }

    #[test]
    fn test_state_machine_error_converts() {
        let err: ReservationError = StateMachineError::SubmissionInProgress.into();
        assert!(matches!(
            err,
            ReservationError::StateMachine(StateMachineError::SubmissionInProgress)
        ));
    }
}
