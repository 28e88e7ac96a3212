use parking_lot::Mutex;
use std::io::Write;
use tempfile::NamedTempFile;

use reservation_core::config::{ConfigurationError, ReservationConfig};
use reservation_core::state_machine::{BookingWizard, WizardSettings};

// Loading reads process environment, so tests that touch it run one at a time
static ENV_LOCK: Mutex<()> = parking_lot::const_mutex(());

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_partial_file_overrides_defaults() {
    let _guard = ENV_LOCK.lock();
    let file = write_config(
        r#"
[gateway]
endpoint = "https://relay.example.com/ajax/bookings"

[wizard]
fallback_phone = "01234 567890"
"#,
    );

    let config = ReservationConfig::load_from(Some(file.path())).unwrap();
    assert_eq!(config.gateway.endpoint, "https://relay.example.com/ajax/bookings");
    assert_eq!(config.gateway.timeout_ms, 20_000);
    assert_eq!(config.wizard.fallback_phone, "01234 567890");
    assert_eq!(config.wizard.reset_delay_ms, 500);

    let settings = WizardSettings::from(&config);
    assert_eq!(settings.fallback_phone, "01234 567890");
    assert_eq!(settings.submission_timeout.as_millis(), 20_000);
}

#[test]
fn test_environment_overrides_file() {
    let _guard = ENV_LOCK.lock();
    let file = write_config(
        r#"
[gateway]
timeout_ms = 15000
"#,
    );

    std::env::set_var("RESERVATION__GATEWAY__TIMEOUT_MS", "30000");
    std::env::set_var("RESERVATION__LOGGING__JSON", "true");
    let result = ReservationConfig::load_from(Some(file.path()));
    std::env::remove_var("RESERVATION__GATEWAY__TIMEOUT_MS");
    std::env::remove_var("RESERVATION__LOGGING__JSON");

    let config = result.unwrap();
    assert_eq!(config.gateway.timeout_ms, 30_000);
    assert!(config.logging.json);
}

#[test]
fn test_out_of_range_file_values_are_rejected() {
    let _guard = ENV_LOCK.lock();
    let file = write_config(
        r#"
[wizard]
reset_delay_ms = 600000
"#,
    );

    let err = ReservationConfig::load_from(Some(file.path())).unwrap_err();
    assert!(matches!(
        err,
        ConfigurationError::Invalid { ref field, .. } if field == "wizard.reset_delay_ms"
    ));
}

#[test]
fn test_malformed_file_is_a_load_error() {
    let _guard = ENV_LOCK.lock();
    let file = write_config("[gateway\nendpoint = ");

    let err = ReservationConfig::load_from(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigurationError::Load(_)));
}

#[test]
fn test_wizard_from_config() {
    let _guard = ENV_LOCK.lock();
    let file = write_config(
        r#"
[gateway]
endpoint = "http://127.0.0.1:9/relay"
timeout_ms = 2000
"#,
    );

    let config = ReservationConfig::load_from(Some(file.path())).unwrap();
    let wizard = BookingWizard::from_config(&config).unwrap();
    assert_eq!(wizard.settings().submission_timeout.as_millis(), 2_000);
    assert!(format!("{wizard:?}").contains("http"));
}
