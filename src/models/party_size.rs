use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_PARTY_SIZE, MAX_EXACT_PARTY_SIZE, OVERFLOW_PARTY_LABEL};
use crate::validation::{ValidationError, ValidationResult};

/// Party size choice: an exact count up to seven, or the "8+" overflow bucket
///
/// Serializes as a JSON integer for exact counts and as the string `"8+"`
/// for the overflow bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartySize {
    Guests(u8),
    EightOrMore,
}

impl PartySize {
    /// Map a head count onto the offered buckets; eight or more collapses to `EightOrMore`
    pub fn new(count: u8) -> ValidationResult<Self> {
        match count {
            0 => Err(ValidationError::InvalidPartySize {
                value: count.to_string(),
            }),
            n if n <= MAX_EXACT_PARTY_SIZE => Ok(Self::Guests(n)),
            _ => Ok(Self::EightOrMore),
        }
    }

    /// Every selectable option, in display order
    pub fn options() -> Vec<PartySize> {
        (1..=MAX_EXACT_PARTY_SIZE)
            .map(Self::Guests)
            .chain(std::iter::once(Self::EightOrMore))
            .collect()
    }

    /// Check that an exact count is one of the offered options (1 to 7)
    pub fn validate(&self) -> ValidationResult<()> {
        match self {
            Self::Guests(n) if !(1..=MAX_EXACT_PARTY_SIZE).contains(n) => {
                Err(ValidationError::InvalidPartySize {
                    value: n.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn is_offered(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::EightOrMore)
    }

    /// Exact head count, if known
    pub fn count(&self) -> Option<u8> {
        match self {
            Self::Guests(n) => Some(*n),
            Self::EightOrMore => None,
        }
    }
}

impl Default for PartySize {
    fn default() -> Self {
        Self::Guests(DEFAULT_PARTY_SIZE)
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guests(n) => write!(f, "{n}"),
            Self::EightOrMore => f.write_str(OVERFLOW_PARTY_LABEL),
        }
    }
}

impl FromStr for PartySize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == OVERFLOW_PARTY_LABEL {
            return Ok(Self::EightOrMore);
        }
        let count: u8 = trimmed
            .parse()
            .map_err(|_| ValidationError::InvalidPartySize {
                value: s.to_string(),
            })?;
        if count > MAX_EXACT_PARTY_SIZE + 1 {
            return Err(ValidationError::InvalidPartySize {
                value: s.to_string(),
            });
        }
        Self::new(count)
    }
}

impl Serialize for PartySize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Guests(n) => serializer.serialize_u8(*n),
            Self::EightOrMore => serializer.serialize_str(OVERFLOW_PARTY_LABEL),
        }
    }
}

struct PartySizeVisitor;

impl Visitor<'_> for PartySizeVisitor {
    type Value = PartySize;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer from 1 to 7 or the string \"8+\"")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<PartySize, E> {
        match u8::try_from(v) {
            Ok(n) if (1..=MAX_EXACT_PARTY_SIZE).contains(&n) => Ok(PartySize::Guests(n)),
            _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<PartySize, E> {
        match u64::try_from(v) {
            Ok(n) => self.visit_u64(n),
            Err(_) => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<PartySize, E> {
        v.parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for PartySize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PartySizeVisitor)
    }
}
