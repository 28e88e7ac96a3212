//! # Input Validation
//!
//! Field-level checks for reservation input. These are shape checks only;
//! the gateway remains the authority on whether a request is accepted.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid email address: {email:?}")]
    InvalidEmail { email: String },

    #[error("Invalid date {value:?}: expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Reservation date {date} is before the earliest bookable date {min_date}")]
    DateInPast { date: NaiveDate, min_date: NaiveDate },

    #[error("Invalid party size {value:?}: expected 1-7 or 8+")]
    InvalidPartySize { value: String },

    #[error("Time {value:?} is not an offered slot")]
    UnknownTimeSlot { value: String },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Basic email shape: one `@`, non-empty local part and domain, no whitespace
pub fn validate_email_shape(email: &str) -> ValidationResult<()> {
    let trimmed = email.trim();
    let invalid = || ValidationError::InvalidEmail {
        email: email.to_string(),
    };

    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let mut parts = trimmed.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    validate_email_shape(email).is_ok()
}

pub fn parse_iso_date(value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        value: value.to_string(),
    })
}

/// Reject dates earlier than `min_date` (the day the wizard was opened)
pub fn validate_reservation_date(date: NaiveDate, min_date: NaiveDate) -> ValidationResult<()> {
    if date < min_date {
        return Err(ValidationError::DateInPast { date, min_date });
    }
    Ok(())
}
