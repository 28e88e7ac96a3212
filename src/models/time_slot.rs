use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::constants::{LUNCH_CUTOFF_HOUR, OFFERED_SLOTS};
use crate::validation::{ValidationError, ValidationResult};

/// Service window a slot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotGroup {
    Lunch,
    Dinner,
}

impl SlotGroup {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for SlotGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lunch => write!(f, "lunch"),
            Self::Dinner => write!(f, "dinner"),
        }
    }
}

/// One offered dining time. Only values from the fixed slot list can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    /// All offered slots in display order
    pub fn offered() -> Vec<TimeSlot> {
        OFFERED_SLOTS
            .iter()
            .filter_map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0))
            .map(TimeSlot)
            .collect()
    }

    /// Offered slots partitioned by service window
    pub fn grouped() -> Vec<(SlotGroup, Vec<TimeSlot>)> {
        let (lunch, dinner): (Vec<_>, Vec<_>) = Self::offered()
            .into_iter()
            .partition(|slot| slot.group() == SlotGroup::Lunch);
        vec![(SlotGroup::Lunch, lunch), (SlotGroup::Dinner, dinner)]
    }

    pub fn from_hm(hour: u32, minute: u32) -> ValidationResult<Self> {
        let unknown = || ValidationError::UnknownTimeSlot {
            value: format!("{hour:02}:{minute:02}"),
        };
        if !OFFERED_SLOTS.contains(&(hour, minute)) {
            return Err(unknown());
        }
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(TimeSlot)
            .ok_or_else(unknown)
    }

    pub fn group(&self) -> SlotGroup {
        if self.0.hour() < LUNCH_CUTOFF_HOUR {
            SlotGroup::Lunch
        } else {
            SlotGroup::Dinner
        }
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for TimeSlot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| {
            ValidationError::UnknownTimeSlot {
                value: s.to_string(),
            }
        })?;
        Self::from_hm(time.hour(), time.minute())
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offered_slots() {
        let slots = TimeSlot::offered();
        assert_eq!(slots.len(), 10);
        assert_eq!(slots[0].to_string(), "12:00");
        assert_eq!(slots[9].to_string(), "20:30");
    }

    #[test]
    fn test_grouping() {
        let grouped = TimeSlot::grouped();
        assert_eq!(grouped[0].0, SlotGroup::Lunch);
        assert_eq!(grouped[0].1.len(), 4);
        assert_eq!(grouped[1].0, SlotGroup::Dinner);
        assert_eq!(grouped[1].1.len(), 6);
        assert!(grouped[1]
            .1
            .iter()
            .all(|slot| slot.to_string().as_str() >= "18:00"));
    }

    #[test]
    fn test_parse_only_offered() {
        let slot: TimeSlot = "19:00".parse().unwrap();
        assert_eq!(slot.group(), SlotGroup::Dinner);
        assert_eq!("12:30".parse::<TimeSlot>().unwrap().group(), SlotGroup::Lunch);

        assert!("16:00".parse::<TimeSlot>().is_err());
        assert!("19:15".parse::<TimeSlot>().is_err());
        assert!("7pm".parse::<TimeSlot>().is_err());
        assert!("".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let slot = TimeSlot::from_hm(18, 30).unwrap();
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"18:30\"");
        let parsed: TimeSlot = serde_json::from_str("\"18:30\"").unwrap();
        assert_eq!(parsed, slot);
        assert!(serde_json::from_str::<TimeSlot>("\"03:00\"").is_err());
    }
}
