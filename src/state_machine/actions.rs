use serde_json::{json, Value};
use uuid::Uuid;

use super::history::TransitionRecord;
use super::outcome::FailureNotice;
use super::states::WizardStage;
use crate::constants::events;
use crate::events::EventPublisher;
use crate::models::ReservationDraft;

/// Trait for side effects run after a transition has been applied
pub trait StateAction: Send + Sync {
    /// Execute the action
    fn execute(&self, session_id: Uuid, transition: &TransitionRecord, draft: &ReservationDraft);

    /// Get a description of this action for logging
    fn description(&self) -> &'static str;
}

/// Action to publish lifecycle events when stage transitions occur
pub struct PublishTransitionEventAction {
    event_publisher: EventPublisher,
    fallback_phone: String,
}

impl PublishTransitionEventAction {
    pub fn new(event_publisher: EventPublisher, fallback_phone: impl Into<String>) -> Self {
        Self {
            event_publisher,
            fallback_phone: fallback_phone.into(),
        }
    }
}

impl StateAction for PublishTransitionEventAction {
    fn execute(&self, session_id: Uuid, transition: &TransitionRecord, draft: &ReservationDraft) {
        let Some(event_name) = determine_event_name(transition.from, transition.to) else {
            return;
        };

        let mut context = build_event_context(session_id, transition, draft);
        if let (Some(reason), Value::Object(map)) = (transition.event.error_message(), &mut context)
        {
            let notice = FailureNotice::new(reason, self.fallback_phone.clone());
            map.insert("reason".to_string(), json!(notice.reason));
            map.insert("fallback_phone".to_string(), json!(notice.fallback_phone));
            map.insert("message".to_string(), json!(notice.message()));
        }

        self.event_publisher.publish(event_name, context);
    }

    fn description(&self) -> &'static str {
        "Publish lifecycle event for wizard transition"
    }
}

/// Action to log every transition with structured fields
pub struct LogTransitionAction;

impl StateAction for LogTransitionAction {
    fn execute(&self, session_id: Uuid, transition: &TransitionRecord, draft: &ReservationDraft) {
        tracing::info!(
            session_id = %session_id,
            from = %transition.from,
            to = %transition.to,
            event = transition.event.event_type(),
            gateway_result = transition.event.is_gateway_result(),
            step1_valid = draft.is_step1_valid(),
            step2_valid = draft.is_step2_valid(),
            "Wizard transition applied"
        );
    }

    fn description(&self) -> &'static str {
        "Log wizard transition"
    }
}

/// Map a transition onto its lifecycle event name
pub fn determine_event_name(from: WizardStage, to: WizardStage) -> Option<&'static str> {
    use WizardStage::*;

    match (from, to) {
        (Closed, CollectingSchedule) => Some(events::RESERVATION_OPENED),
        (CollectingSchedule, CollectingContact) => Some(events::RESERVATION_SCHEDULE_COMPLETED),
        (CollectingContact, CollectingSchedule) => Some(events::RESERVATION_RETURNED_TO_SCHEDULE),
        (CollectingContact, Submitting) => Some(events::RESERVATION_SUBMISSION_REQUESTED),
        (Submitting, Confirmed) => Some(events::RESERVATION_CONFIRMED),
        (Submitting, CollectingContact) => Some(events::RESERVATION_SUBMISSION_FAILED),
        (_, Closed) => Some(events::RESERVATION_CLOSED),
        _ => None,
    }
}

/// Event context shared by every lifecycle event. Contact details are left out.
pub fn build_event_context(
    session_id: Uuid,
    transition: &TransitionRecord,
    draft: &ReservationDraft,
) -> Value {
    json!({
        "session_id": session_id.to_string(),
        "from_state": transition.from.to_string(),
        "to_state": transition.to.to_string(),
        "event_type": transition.event.event_type(),
        "party_size": draft.party_size.to_string(),
        "date": draft.date.map(|d| d.format("%Y-%m-%d").to_string()),
        "time": draft.time.map(|t| t.to_string()),
        "timestamp": transition.occurred_at.to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::events::WizardEvent;

    #[test]
    fn test_event_names() {
        use WizardStage::*;
        assert_eq!(
            determine_event_name(Closed, CollectingSchedule),
            Some("reservation.opened")
        );
        assert_eq!(
            determine_event_name(Submitting, CollectingContact),
            Some("reservation.submission_failed")
        );
        assert_eq!(
            determine_event_name(Submitting, Closed),
            Some("reservation.closed")
        );
        assert_eq!(determine_event_name(Confirmed, Submitting), None);
    }

    #[test]
    fn test_action_descriptions() {
        let action = PublishTransitionEventAction::new(EventPublisher::default(), "0");
        assert_eq!(
            action.description(),
            "Publish lifecycle event for wizard transition"
        );
        assert_eq!(LogTransitionAction.description(), "Log wizard transition");
    }

    #[tokio::test]
    async fn test_failure_event_carries_notice() {
        let publisher = EventPublisher::new(4);
        let mut receiver = publisher.subscribe();
        let action = PublishTransitionEventAction::new(publisher, "023 8251 5195");

        let transition = TransitionRecord::new(
            WizardStage::Submitting,
            WizardStage::CollectingContact,
            WizardEvent::rejected_with("mail server unavailable"),
        );
        action.execute(Uuid::new_v4(), &transition, &ReservationDraft::default());

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.name, "reservation.submission_failed");
        assert_eq!(event.context_str("reason"), Some("mail server unavailable"));
        assert_eq!(event.context_str("fallback_phone"), Some("023 8251 5195"));
        assert!(event
            .context_str("message")
            .unwrap()
            .contains("mail server unavailable"));
        assert!(event.context.get("email").is_none());
    }
}
