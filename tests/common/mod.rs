#![allow(dead_code)]

pub mod stubs;
pub mod strategies;

pub use stubs::*;

use chrono::NaiveDate;
use reservation_core::state_machine::{BookingWizard, WizardSettings};
use std::sync::Arc;
use std::time::Duration;

use reservation_core::gateway::SubmissionGateway;

/// The day test wizards are opened on; every literal scenario date is on or after it
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

pub fn scenario_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
}

pub fn test_settings(reset_delay_ms: u64) -> WizardSettings {
    WizardSettings {
        reset_delay: Duration::from_millis(reset_delay_ms),
        submission_timeout: Duration::from_secs(5),
        ..WizardSettings::default()
    }
}

pub fn wizard_with<G>(gateway: Arc<G>) -> BookingWizard
where
    G: SubmissionGateway + 'static,
{
    BookingWizard::new(gateway, test_settings(50))
}

/// Open the wizard and complete step 1 with the literal scenario values
pub fn complete_schedule(wizard: &BookingWizard) {
    wizard.open_on(test_today()).unwrap();
    wizard
        .set_party_size(reservation_core::models::PartySize::Guests(4))
        .unwrap();
    wizard.set_date(scenario_date()).unwrap();
    wizard.set_time_str("19:00").unwrap();
    wizard.continue_to_contact().unwrap();
}

/// Open the wizard and leave it on step 2 ready to submit
pub fn ready_to_submit(wizard: &BookingWizard) {
    complete_schedule(wizard);
    wizard.set_first_name("Jane").unwrap();
    wizard.set_last_name("Doe").unwrap();
    wizard.set_email("jane@example.com").unwrap();
}
