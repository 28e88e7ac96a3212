use super::errors::{business_rule_violation, GuardError, GuardResult};
use super::events::WizardEvent;
use super::states::WizardStage;
use crate::models::ReservationDraft;
use crate::validation::validate_email_shape;

/// Trait for implementing step-completion guards
pub trait StateGuard<T> {
    /// Check if the guarded transition is allowed
    fn check(&self, entity: &T) -> GuardResult<()>;

    /// Get a description of this guard for logging
    fn description(&self) -> &'static str;

    fn passes(&self, entity: &T) -> bool {
        self.check(entity).is_ok()
    }
}

/// Transition table for the booking wizard
#[derive(Debug)]
pub struct TransitionGuard;

impl TransitionGuard {
    /// Check if `event` may move the wizard from `from` to `to`
    pub fn can_transition(from: WizardStage, to: WizardStage, event: &WizardEvent) -> GuardResult<()> {
        use WizardEvent::*;
        use WizardStage::*;

        let valid = match (from, to, event) {
            (Closed, CollectingSchedule, Open) => true,
            (CollectingSchedule, CollectingContact, ContinueToContact) => true,
            (CollectingContact, CollectingSchedule, Back) => true,
            (CollectingContact, Submitting, Submit) => true,
            (Submitting, Confirmed, GatewayAccepted) => true,
            (Submitting, CollectingContact, GatewayRejected(_)) => true,

            // Dismissal from any open stage
            (from, Closed, Close) if from.is_open() => true,

            _ => false,
        };

        if valid {
            Ok(())
        } else {
            Err(business_rule_violation(format!(
                "Invalid transition from {from} to {to} with event {}",
                event.event_type()
            )))
        }
    }
}

/// Guard for leaving step 1: an offered party size plus a date and a slot
#[derive(Debug)]
pub struct ScheduleCompleteGuard;

impl StateGuard<ReservationDraft> for ScheduleCompleteGuard {
    fn check(&self, draft: &ReservationDraft) -> GuardResult<()> {
        if !draft.party_size.is_offered() {
            return Err(GuardError::InvalidPartySize {
                value: draft.party_size.to_string(),
            });
        }
        let missing = match (draft.date.is_some(), draft.time.is_some()) {
            (true, true) => return Ok(()),
            (false, true) => "date",
            (true, false) => "time",
            (false, false) => "date and time",
        };
        Err(GuardError::ScheduleIncomplete {
            missing: missing.to_string(),
        })
    }

    fn description(&self) -> &'static str {
        "Date and time must be selected"
    }
}

/// Guard for submitting step 2: first name and a well-formed email are required
#[derive(Debug)]
pub struct ContactCompleteGuard;

impl StateGuard<ReservationDraft> for ContactCompleteGuard {
    fn check(&self, draft: &ReservationDraft) -> GuardResult<()> {
        if draft.first_name.trim().is_empty() {
            return Err(GuardError::MissingFirstName);
        }
        if draft.email.trim().is_empty() {
            return Err(GuardError::MissingEmail);
        }
        validate_email_shape(&draft.email).map_err(|_| GuardError::InvalidEmail {
            email: draft.email.clone(),
        })
    }

    fn description(&self) -> &'static str {
        "First name and a valid email address are required"
    }
}
