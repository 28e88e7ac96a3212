use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{
    actions::{LogTransitionAction, PublishTransitionEventAction, StateAction},
    errors::{invalid_transition, GuardError, StateMachineError, StateMachineResult},
    events::WizardEvent,
    guards::{ContactCompleteGuard, ScheduleCompleteGuard, StateGuard, TransitionGuard},
    history::{TransitionHistory, TransitionRecord},
    outcome::{FailureNotice, SubmissionOutcome},
    reset::PendingReset,
    states::WizardStage,
};
use crate::config::ReservationConfig;
use crate::constants::events;
use crate::constants::system::{
    DEFAULT_EVENT_CAPACITY, DEFAULT_FALLBACK_PHONE, GENERIC_SUBMISSION_FAILURE,
};
use crate::constants::{default_reset_delay, default_submission_timeout};
use crate::events::{EventPublisher, PublishedEvent};
use crate::gateway::{GatewayError, GatewayResult, HttpSubmissionGateway, SubmissionGateway};
use crate::logging::{log_error, log_wizard_operation};
use crate::models::{
    ConfirmationSummary, DraftSeed, PartySize, ReservationDraft, ReservationPayload, TimeSlot,
};
use crate::validation::{parse_iso_date, validate_reservation_date};

/// Runtime knobs for a [`BookingWizard`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSettings {
    pub reset_delay: Duration,
    pub submission_timeout: Duration,
    pub fallback_phone: String,
    pub event_capacity: usize,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            reset_delay: default_reset_delay(),
            submission_timeout: default_submission_timeout(),
            fallback_phone: DEFAULT_FALLBACK_PHONE.to_string(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl From<&ReservationConfig> for WizardSettings {
    fn from(config: &ReservationConfig) -> Self {
        Self {
            reset_delay: config.wizard.reset_delay(),
            submission_timeout: config.gateway.timeout(),
            fallback_phone: config.wizard.fallback_phone.clone(),
            event_capacity: config.wizard.event_capacity,
        }
    }
}

/// Mutable wizard state, only ever touched under the lock
#[derive(Debug, Default)]
struct WizardInner {
    stage: WizardStage,
    draft: ReservationDraft,
    session_id: Option<Uuid>,
    min_date: Option<NaiveDate>,
    history: TransitionHistory,
    generation: u64,
    pending_reset: Option<PendingReset>,
}

impl WizardInner {
    fn cancel_pending_reset(&mut self) {
        if let Some(pending) = self.pending_reset.take() {
            debug!(generation = pending.generation(), "Cancelling pending draft reset");
            pending.cancel();
        }
    }

    fn reset_draft(&mut self) {
        self.draft = ReservationDraft::default();
        self.min_date = None;
        self.history.clear();
        self.pending_reset = None;
    }

    /// Apply a scheduled reset if nothing has happened since it was scheduled
    fn apply_reset(&mut self, generation: u64) -> bool {
        if self.generation != generation || self.stage != WizardStage::Closed {
            return false;
        }
        self.reset_draft();
        true
    }
}

/// Three-step table reservation wizard
///
/// Cloning is cheap and every clone drives the same session, so a UI layer
/// can hand one clone to the submit task and keep another for `close()`.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use reservation_core::gateway::HttpSubmissionGateway;
/// use reservation_core::config::GatewayConfig;
/// use reservation_core::state_machine::{BookingWizard, WizardSettings, WizardStage};
/// use std::sync::Arc;
///
/// let gateway = Arc::new(HttpSubmissionGateway::new(&GatewayConfig::default()).unwrap());
/// let wizard = BookingWizard::new(gateway, WizardSettings::default());
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
/// wizard.open_on(today).unwrap();
/// wizard.set_date_str("2026-03-10").unwrap();
/// wizard.set_time_str("19:00").unwrap();
/// assert_eq!(wizard.continue_to_contact().unwrap(), WizardStage::CollectingContact);
/// ```
#[derive(Clone)]
pub struct BookingWizard {
    inner: Arc<Mutex<WizardInner>>,
    gateway: Arc<dyn SubmissionGateway>,
    event_publisher: EventPublisher,
    settings: WizardSettings,
    actions: Arc<Vec<Box<dyn StateAction>>>,
}

impl std::fmt::Debug for BookingWizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("BookingWizard")
            .field("stage", &inner.stage)
            .field("session_id", &inner.session_id)
            .field("gateway", &self.gateway.name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl BookingWizard {
    /// Create a closed wizard with its own event publisher
    pub fn new(gateway: Arc<dyn SubmissionGateway>, settings: WizardSettings) -> Self {
        let event_publisher = EventPublisher::new(settings.event_capacity);
        Self::with_event_publisher(gateway, settings, event_publisher)
    }

    /// Create a closed wizard that publishes lifecycle events to `event_publisher`
    pub fn with_event_publisher(
        gateway: Arc<dyn SubmissionGateway>,
        settings: WizardSettings,
        event_publisher: EventPublisher,
    ) -> Self {
        let actions: Vec<Box<dyn StateAction>> = vec![
            Box::new(LogTransitionAction),
            Box::new(PublishTransitionEventAction::new(
                event_publisher.clone(),
                settings.fallback_phone.clone(),
            )),
        ];

        Self {
            inner: Arc::new(Mutex::new(WizardInner::default())),
            gateway,
            event_publisher,
            settings,
            actions: Arc::new(actions),
        }
    }

    /// Create a wizard backed by the HTTP gateway described in `config`
    pub fn from_config(config: &ReservationConfig) -> GatewayResult<Self> {
        let gateway = HttpSubmissionGateway::new(&config.gateway)?;
        Ok(Self::new(Arc::new(gateway), WizardSettings::from(config)))
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Open the wizard on step 1, using the local calendar date as the lower bound
    pub fn open(&self) -> StateMachineResult<WizardStage> {
        self.open_on_with(Local::now().date_naive(), DraftSeed::default())
    }

    /// Open the wizard with `today` as the earliest bookable date
    pub fn open_on(&self, today: NaiveDate) -> StateMachineResult<WizardStage> {
        self.open_on_with(today, DraftSeed::default())
    }

    /// Open the wizard with party size, date or time already chosen
    pub fn open_with(&self, seed: DraftSeed) -> StateMachineResult<WizardStage> {
        self.open_on_with(Local::now().date_naive(), seed)
    }

    pub fn open_on_with(&self, today: NaiveDate, seed: DraftSeed) -> StateMachineResult<WizardStage> {
        let mut inner = self.inner.lock();

        let event = WizardEvent::Open;
        let target_state = Self::determine_target_state(inner.stage, &event)?;
        if let Some(party_size) = seed.party_size {
            party_size.validate()?;
        }
        if let Some(date) = seed.date {
            validate_reservation_date(date, today)?;
        }

        inner.cancel_pending_reset();
        inner.generation += 1;
        inner.draft = ReservationDraft::default();
        inner.draft.apply_seed(&seed);
        inner.history.clear();
        inner.min_date = Some(today);
        let session_id = Uuid::new_v4();
        inner.session_id = Some(session_id);

        self.apply_transition(&mut inner, target_state, event)?;
        log_wizard_operation(
            "open",
            Some(session_id),
            &target_state.to_string(),
            "opened",
            None,
        );
        Ok(target_state)
    }

    /// Step 1 → step 2, once a date and a slot are chosen
    pub fn continue_to_contact(&self) -> StateMachineResult<WizardStage> {
        let mut inner = self.inner.lock();
        self.transition_locked(&mut inner, WizardEvent::ContinueToContact)
    }

    /// Step 2 → step 1 with the draft untouched
    pub fn back(&self) -> StateMachineResult<WizardStage> {
        let mut inner = self.inner.lock();
        self.transition_locked(&mut inner, WizardEvent::Back)
    }

    /// Send the reservation request
    ///
    /// Gateway failures do not surface as `Err`: they come back as
    /// [`SubmissionOutcome::Failed`] with the wizard returned to step 2.
    /// `Err` means the submission never started.
    pub async fn submit_reservation(&self) -> StateMachineResult<SubmissionOutcome> {
        let (session_id, payload) = {
            let mut inner = self.inner.lock();
            let event = WizardEvent::Submit;
            let current_state = inner.stage;
            let target_state = Self::determine_target_state(current_state, &event)?;
            Self::check_guards(current_state, target_state, &event, &inner.draft)?;

            let payload = ReservationPayload::from_draft(&inner.draft).ok_or_else(|| {
                GuardError::ScheduleIncomplete {
                    missing: "date and time".to_string(),
                }
            })?;
            let session_id = inner
                .session_id
                .ok_or_else(|| invalid_transition(current_state, event.event_type()))?;

            self.apply_transition(&mut inner, target_state, event)?;
            (session_id, payload)
        };
        let mut in_flight = InFlightSubmission::new(self, session_id);

        let started = Instant::now();
        let result = match tokio::time::timeout(
            self.settings.submission_timeout,
            self.gateway.submit(&payload, session_id),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout {
                timeout_ms: u64::try_from(self.settings.submission_timeout.as_millis())
                    .unwrap_or(u64::MAX),
            }),
        };
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let mut inner = self.inner.lock();
        in_flight.disarm();
        if inner.session_id != Some(session_id) || !inner.stage.is_active() {
            debug!(
                session_id = %session_id,
                stage = %inner.stage,
                elapsed_ms,
                "Discarding gateway response for a session that is no longer current"
            );
            self.event_publisher.publish(
                events::RESERVATION_STALE_RESPONSE_DISCARDED,
                json!({
                    "session_id": session_id.to_string(),
                    "accepted": result.is_ok(),
                    "elapsed_ms": elapsed_ms,
                }),
            );
            return Ok(SubmissionOutcome::Discarded);
        }

        match result {
            Ok(ack) => {
                let summary = ConfirmationSummary::from_draft(&inner.draft).ok_or_else(|| {
                    GuardError::ScheduleIncomplete {
                        missing: "date and time".to_string(),
                    }
                })?;
                self.apply_transition(&mut inner, WizardStage::Confirmed, WizardEvent::GatewayAccepted)?;
                log_wizard_operation(
                    "submit",
                    Some(session_id),
                    &WizardStage::Confirmed.to_string(),
                    "confirmed",
                    ack.message(),
                );
                Ok(SubmissionOutcome::Confirmed(summary))
            }
            Err(err) => {
                let reason = err
                    .user_reason()
                    .unwrap_or(GENERIC_SUBMISSION_FAILURE)
                    .to_string();
                warn!(
                    session_id = %session_id,
                    gateway = self.gateway.name(),
                    error = %err,
                    status = ?err.status(),
                    timed_out = err.is_timeout(),
                    elapsed_ms,
                    "Reservation request failed"
                );
                let notice = FailureNotice::new(reason.clone(), self.settings.fallback_phone.clone());
                self.apply_transition(
                    &mut inner,
                    WizardStage::CollectingContact,
                    WizardEvent::GatewayRejected(reason),
                )?;
                Ok(SubmissionOutcome::Failed(notice))
            }
        }
    }

    /// Dismiss the wizard from any stage
    ///
    /// Ends the current session, so a response still in flight is dropped
    /// when it arrives. The draft is cleared after the reset delay unless the
    /// wizard is reopened first. Closing a closed wizard does nothing.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        if !inner.stage.is_open() {
            return;
        }

        let session_id = inner.session_id;
        if let Err(err) = self.transition_locked(&mut inner, WizardEvent::Close) {
            warn!(error = %err, "Close transition refused");
            return;
        }
        inner.session_id = None;
        log_wizard_operation("close", session_id, &WizardStage::Closed.to_string(), "closed", None);

        self.schedule_reset(&mut inner);
    }

    fn schedule_reset(&self, inner: &mut WizardInner) {
        inner.cancel_pending_reset();
        inner.generation += 1;

        let weak_inner = Arc::downgrade(&self.inner);
        let publisher = self.event_publisher.clone();
        let scheduled = PendingReset::schedule(self.settings.reset_delay, inner.generation, move |generation| {
            let Some(shared) = weak_inner.upgrade() else {
                return;
            };
            let mut inner = shared.lock();
            if inner.apply_reset(generation) {
                publish_reset(&publisher, generation);
            }
        });

        match scheduled {
            Some(pending) => inner.pending_reset = Some(pending),
            None => {
                debug!("No tokio runtime available; resetting draft immediately");
                inner.reset_draft();
                publish_reset(&self.event_publisher, inner.generation);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Draft edits
    // ---------------------------------------------------------------------

    fn edit_draft<F>(&self, edit: F) -> StateMachineResult<()>
    where
        F: FnOnce(&mut ReservationDraft),
    {
        let mut inner = self.inner.lock();
        if !inner.stage.accepts_edits() {
            return Err(StateMachineError::DraftLocked { stage: inner.stage });
        }
        edit(&mut inner.draft);
        Ok(())
    }

    /// Choose a party size; exact counts outside 1 to 7 are refused
    pub fn set_party_size(&self, party_size: PartySize) -> StateMachineResult<()> {
        let mut inner = self.inner.lock();
        if !inner.stage.accepts_edits() {
            return Err(StateMachineError::DraftLocked { stage: inner.stage });
        }
        party_size.validate()?;
        inner.draft.party_size = party_size;
        Ok(())
    }

    /// Choose a date; dates before the day the wizard opened are refused
    pub fn set_date(&self, date: NaiveDate) -> StateMachineResult<()> {
        let mut inner = self.inner.lock();
        if !inner.stage.accepts_edits() {
            return Err(StateMachineError::DraftLocked { stage: inner.stage });
        }
        if let Some(min_date) = inner.min_date {
            validate_reservation_date(date, min_date)?;
        }
        inner.draft.date = Some(date);
        Ok(())
    }

    pub fn set_date_str(&self, value: &str) -> StateMachineResult<()> {
        let date = parse_iso_date(value)?;
        self.set_date(date)
    }

    pub fn set_time(&self, time: TimeSlot) -> StateMachineResult<()> {
        self.edit_draft(|draft| draft.time = Some(time))
    }

    pub fn set_time_str(&self, value: &str) -> StateMachineResult<()> {
        let time: TimeSlot = value.parse()?;
        self.set_time(time)
    }

    pub fn set_first_name(&self, value: impl Into<String>) -> StateMachineResult<()> {
        let value = value.into();
        self.edit_draft(|draft| draft.first_name = value)
    }

    pub fn set_last_name(&self, value: impl Into<String>) -> StateMachineResult<()> {
        let value = value.into();
        self.edit_draft(|draft| draft.last_name = value)
    }

    pub fn set_email(&self, value: impl Into<String>) -> StateMachineResult<()> {
        let value = value.into();
        self.edit_draft(|draft| draft.email = value)
    }

    pub fn set_phone(&self, value: impl Into<String>) -> StateMachineResult<()> {
        let value = value.into();
        self.edit_draft(|draft| draft.phone = value)
    }

    pub fn set_special_requests(&self, value: impl Into<String>) -> StateMachineResult<()> {
        let value = value.into();
        self.edit_draft(|draft| draft.special_requests = value)
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    pub fn stage(&self) -> WizardStage {
        self.inner.lock().stage
    }

    /// Snapshot of the current draft
    pub fn draft(&self) -> ReservationDraft {
        self.inner.lock().draft.clone()
    }

    pub fn is_step1_valid(&self) -> bool {
        self.inner.lock().draft.is_step1_valid()
    }

    pub fn is_step2_valid(&self) -> bool {
        self.inner.lock().draft.is_step2_valid()
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.inner.lock().session_id
    }

    /// Earliest bookable date for the current session
    pub fn min_date(&self) -> Option<NaiveDate> {
        self.inner.lock().min_date
    }

    /// Transitions applied since the wizard was last opened
    pub fn transitions(&self) -> Vec<TransitionRecord> {
        self.inner.lock().history.records().to_vec()
    }

    /// Step 3 summary; `None` unless the request was confirmed
    pub fn confirmation_summary(&self) -> Option<ConfirmationSummary> {
        let inner = self.inner.lock();
        if inner.stage != WizardStage::Confirmed {
            return None;
        }
        ConfirmationSummary::from_draft(&inner.draft)
    }

    pub fn has_pending_reset(&self) -> bool {
        self.inner
            .lock()
            .pending_reset
            .as_ref()
            .is_some_and(|pending| !pending.is_finished())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.event_publisher.subscribe()
    }

    pub fn event_publisher(&self) -> &EventPublisher {
        &self.event_publisher
    }

    pub fn settings(&self) -> &WizardSettings {
        &self.settings
    }

    // ---------------------------------------------------------------------
    // Transition machinery
    // ---------------------------------------------------------------------

    fn transition_locked(
        &self,
        inner: &mut WizardInner,
        event: WizardEvent,
    ) -> StateMachineResult<WizardStage> {
        let current_state = inner.stage;
        let target_state = Self::determine_target_state(current_state, &event)?;

        Self::check_guards(current_state, target_state, &event, &inner.draft)?;

        self.apply_transition(inner, target_state, event)?;
        Ok(target_state)
    }

    /// Determine the target state based on current state and event
    fn determine_target_state(
        current_state: WizardStage,
        event: &WizardEvent,
    ) -> StateMachineResult<WizardStage> {
        let target = match (current_state, event) {
            (WizardStage::Closed, WizardEvent::Open) => WizardStage::CollectingSchedule,

            (WizardStage::CollectingSchedule, WizardEvent::ContinueToContact) => {
                WizardStage::CollectingContact
            }
            (WizardStage::CollectingContact, WizardEvent::Back) => WizardStage::CollectingSchedule,
            (WizardStage::CollectingContact, WizardEvent::Submit) => WizardStage::Submitting,

            // A second submit while the first is in flight
            (WizardStage::Submitting, WizardEvent::Submit) => {
                return Err(StateMachineError::SubmissionInProgress)
            }

            (WizardStage::Submitting, WizardEvent::GatewayAccepted) => WizardStage::Confirmed,
            (WizardStage::Submitting, WizardEvent::GatewayRejected(_)) => {
                WizardStage::CollectingContact
            }

            (from_state, WizardEvent::Close) if from_state.is_open() => WizardStage::Closed,

            (from_state, _) => return Err(invalid_transition(from_state, event.event_type())),
        };

        Ok(target)
    }

    /// Check step-completion guards for the transition
    fn check_guards(
        current_state: WizardStage,
        target_state: WizardStage,
        event: &WizardEvent,
        draft: &ReservationDraft,
    ) -> StateMachineResult<()> {
        match (current_state, target_state, event) {
            (
                WizardStage::CollectingSchedule,
                WizardStage::CollectingContact,
                WizardEvent::ContinueToContact,
            ) => {
                ScheduleCompleteGuard.check(draft)?;
            }

            (WizardStage::CollectingContact, WizardStage::Submitting, WizardEvent::Submit) => {
                ScheduleCompleteGuard.check(draft)?;
                ContactCompleteGuard.check(draft)?;
            }

            _ => {}
        }

        Ok(())
    }

    /// Commit the transition, then run post-transition actions
    fn apply_transition(
        &self,
        inner: &mut WizardInner,
        target_state: WizardStage,
        event: WizardEvent,
    ) -> StateMachineResult<()> {
        let current_state = inner.stage;
        TransitionGuard::can_transition(current_state, target_state, &event)?;

        inner.stage = target_state;
        let record = TransitionRecord::new(current_state, target_state, event);

        if let Some(session_id) = inner.session_id {
            for action in self.actions.iter() {
                action.execute(session_id, &record, &inner.draft);
            }
        }

        inner.history.record(record);
        Ok(())
    }
}

fn publish_reset(publisher: &EventPublisher, generation: u64) {
    publisher.publish(
        events::RESERVATION_RESET,
        json!({ "generation": generation }),
    );
}

/// Releases a submission whose future was dropped before the gateway answered
///
/// Without this an aborted submit task would leave the wizard in `Submitting`
/// with the draft locked until `close()`.
struct InFlightSubmission<'a> {
    wizard: &'a BookingWizard,
    session_id: Uuid,
    armed: bool,
}

impl<'a> InFlightSubmission<'a> {
    fn new(wizard: &'a BookingWizard, session_id: Uuid) -> Self {
        Self {
            wizard,
            session_id,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightSubmission<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut inner = self.wizard.inner.lock();
        if inner.session_id != Some(self.session_id) || inner.stage != WizardStage::Submitting {
            return;
        }

        warn!(
            session_id = %self.session_id,
            "Submission abandoned before the gateway responded; returning to contact step"
        );
        let event = WizardEvent::GatewayRejected(GENERIC_SUBMISSION_FAILURE.to_string());
        if let Err(err) = self
            .wizard
            .apply_transition(&mut inner, WizardStage::CollectingContact, event)
        {
            log_error(
                "booking_wizard",
                "release_abandoned_submission",
                &err.to_string(),
                Some(&self.session_id.to_string()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayAck;
    use crate::validation::ValidationError;
    use async_trait::async_trait;

    struct AcceptingGateway;

    #[async_trait]
    impl SubmissionGateway for AcceptingGateway {
        async fn submit(
            &self,
            _payload: &ReservationPayload,
            _idempotency_key: Uuid,
        ) -> GatewayResult<GatewayAck> {
            Ok(GatewayAck {
                status: 200,
                body: json!({"ok": true}),
            })
        }

        fn name(&self) -> &str {
            "accepting"
        }
    }

    fn test_wizard() -> BookingWizard {
        let settings = WizardSettings {
            reset_delay: Duration::from_millis(10),
            ..WizardSettings::default()
        };
        BookingWizard::new(Arc::new(AcceptingGateway), settings)
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[test]
    fn test_starts_closed() {
        let wizard = test_wizard();
        assert_eq!(wizard.stage(), WizardStage::Closed);
        assert!(wizard.session_id().is_none());
        assert!(wizard.transitions().is_empty());
        assert!(format!("{wizard:?}").contains("accepting"));
    }

    #[test]
    fn test_open_installs_session_and_bound() {
        let wizard = test_wizard();
        assert_eq!(wizard.open_on(march(1)).unwrap(), WizardStage::CollectingSchedule);
        assert!(wizard.session_id().is_some());
        assert_eq!(wizard.min_date(), Some(march(1)));
        assert_eq!(wizard.draft(), ReservationDraft::default());

        let err = wizard.open_on(march(1)).unwrap_err();
        assert!(matches!(err, StateMachineError::InvalidTransition { .. }));
    }

    #[test]
    fn test_open_with_seed_validates_date() {
        let wizard = test_wizard();
        let seed = DraftSeed {
            date: Some(march(1)),
            ..DraftSeed::default()
        };
        let err = wizard.open_on_with(march(5), seed).unwrap_err();
        assert!(matches!(
            err,
            StateMachineError::Validation(ValidationError::DateInPast { .. })
        ));
        assert_eq!(wizard.stage(), WizardStage::Closed);

        let seed = DraftSeed {
            party_size: Some(PartySize::EightOrMore),
            date: Some(march(10)),
            time: Some("12:30".parse().unwrap()),
        };
        wizard.open_on_with(march(5), seed).unwrap();
        let draft = wizard.draft();
        assert_eq!(draft.party_size, PartySize::EightOrMore);
        assert_eq!(draft.date, Some(march(10)));
        assert!(wizard.is_step1_valid());
    }

    #[test]
    fn test_continue_requires_schedule() {
        let wizard = test_wizard();
        wizard.open_on(march(1)).unwrap();
        wizard.set_date(march(10)).unwrap();

        let err = wizard.continue_to_contact().unwrap_err();
        assert_eq!(
            err,
            StateMachineError::GuardFailed(GuardError::ScheduleIncomplete {
                missing: "time".to_string()
            })
        );
        assert_eq!(wizard.stage(), WizardStage::CollectingSchedule);

        wizard.set_time_str("19:00").unwrap();
        assert_eq!(wizard.continue_to_contact().unwrap(), WizardStage::CollectingContact);
    }

    #[test]
    fn test_past_date_keeps_prior_value() {
        let wizard = test_wizard();
        wizard.open_on(march(5)).unwrap();
        wizard.set_date(march(10)).unwrap();

        let err = wizard.set_date_str("2026-03-04").unwrap_err();
        assert!(matches!(
            err,
            StateMachineError::Validation(ValidationError::DateInPast { .. })
        ));
        assert_eq!(wizard.draft().date, Some(march(10)));

        assert!(wizard.set_date_str("10/03/2026").is_err());
        assert!(wizard.set_time_str("15:00").is_err());
        assert_eq!(wizard.draft().time, None);
    }

    #[test]
    fn test_edits_refused_when_closed() {
        let wizard = test_wizard();
        let err = wizard.set_first_name("Jane").unwrap_err();
        assert_eq!(
            err,
            StateMachineError::DraftLocked {
                stage: WizardStage::Closed
            }
        );
    }

    #[test]
    fn test_back_is_only_valid_from_contact() {
        let wizard = test_wizard();
        wizard.open_on(march(1)).unwrap();
        assert!(matches!(
            wizard.back().unwrap_err(),
            StateMachineError::InvalidTransition { .. }
        ));
    }

    #[test]
    fn test_close_without_runtime_resets_immediately() {
        let wizard = test_wizard();
        wizard.open_on(march(1)).unwrap();
        wizard.set_first_name("Jane").unwrap();
        wizard.close();

        assert_eq!(wizard.stage(), WizardStage::Closed);
        assert!(wizard.session_id().is_none());
        assert!(!wizard.has_pending_reset());
        assert_eq!(wizard.draft(), ReservationDraft::default());

        // Closing again is a no-op
        wizard.close();
        assert_eq!(wizard.stage(), WizardStage::Closed);
    }

    #[tokio::test]
    async fn test_submit_confirms_and_locks_draft() {
        let wizard = test_wizard();
        wizard.open_on(march(1)).unwrap();
        wizard.set_date(march(10)).unwrap();
        wizard.set_time_str("19:00").unwrap();
        wizard.continue_to_contact().unwrap();
        wizard.set_first_name("Jane").unwrap();
        wizard.set_email("jane@example.com").unwrap();

        let outcome = wizard.submit_reservation().await.unwrap();
        assert!(outcome.is_confirmed());
        assert_eq!(wizard.stage(), WizardStage::Confirmed);
        assert!(wizard.confirmation_summary().is_some());
        assert!(matches!(
            wizard.set_email("other@example.com").unwrap_err(),
            StateMachineError::DraftLocked { .. }
        ));

        let path: Vec<WizardStage> = wizard.transitions().iter().map(|t| t.to).collect();
        assert_eq!(
            path,
            vec![
                WizardStage::CollectingSchedule,
                WizardStage::CollectingContact,
                WizardStage::Submitting,
                WizardStage::Confirmed
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_requires_contact_details() {
        let wizard = test_wizard();
        wizard.open_on(march(1)).unwrap();
        wizard.set_date(march(10)).unwrap();
        wizard.set_time_str("12:00").unwrap();
        wizard.continue_to_contact().unwrap();
        wizard.set_first_name("Jane").unwrap();

        let err = wizard.submit_reservation().await.unwrap_err();
        assert_eq!(err, StateMachineError::GuardFailed(GuardError::MissingEmail));
        assert_eq!(wizard.stage(), WizardStage::CollectingContact);
    }

    #[tokio::test]
    async fn test_events_published_for_transitions() {
        let wizard = test_wizard();
        let mut receiver = wizard.subscribe();
        wizard.open_on(march(1)).unwrap();

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.name, events::RESERVATION_OPENED);
        assert_eq!(
            event.context_str("session_id"),
            wizard.session_id().map(|id| id.to_string()).as_deref()
        );
    }
}
