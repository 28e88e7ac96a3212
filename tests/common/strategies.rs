use chrono::NaiveDate;
use proptest::prelude::*;
use proptest::strategy::Just;
use reservation_core::models::{PartySize, TimeSlot};

/// Any offered party size, including the overflow bucket
pub fn party_size_strategy() -> impl Strategy<Value = PartySize> {
    prop_oneof![
        (1u8..=7).prop_map(PartySize::Guests),
        Just(PartySize::EightOrMore),
    ]
}

pub fn time_slot_strategy() -> impl Strategy<Value = TimeSlot> {
    prop::sample::select(TimeSlot::offered())
}

/// Dates on or after the test wizard's opening day
pub fn future_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..365).prop_map(|offset| super::test_today() + chrono::Duration::days(offset))
}

/// A step-1 selection where either field may be missing
pub fn partial_schedule_strategy() -> impl Strategy<Value = (Option<NaiveDate>, Option<TimeSlot>)> {
    (
        prop::option::of(future_date_strategy()),
        prop::option::of(time_slot_strategy()),
    )
}

pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,15}"
}

pub fn blank_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), " {1,4}", "\t{1,2}"]
}

pub fn valid_email_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9.]{0,10}@[a-z]{2,10}\\.(com|co\\.uk|org)"
}

pub fn free_text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.!?'-]{0,60}"
}
