//! Quality value object for extraction confidence (1 to 5 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Threshold at or above which an answer counts toward completion.
const SUFFICIENT: u8 = 3;

/// Extraction confidence score: 1 (vague) to 5 (complete and specific).
///
/// Advisory confidence in the extraction, not a measure of truth. Answers
/// below [`Quality::is_sufficient`] are treated as needing re-elicitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct Quality(u8);

impl TryFrom<u8> for Quality {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Quality::try_from_u8(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> u8 {
        quality.0
    }
}

impl Quality {
    /// Lowest score.
    pub const MIN: Quality = Quality(1);

    /// Highest score.
    pub const MAX: Quality = Quality(5);

    /// Creates a Quality from an integer, returning error if out of range.
    pub fn try_from_u8(value: u8) -> Result<Self, ValidationError> {
        if (1..=5).contains(&value) {
            Ok(Quality(value))
        } else {
            Err(ValidationError::out_of_range(
                "quality",
                1,
                5,
                value as i32,
            ))
        }
    }

    /// Creates a Quality by clamping an arbitrary integer into 1..=5.
    ///
    /// Oracle replies occasionally score outside the contract range; those
    /// are pulled to the nearest bound rather than rejected.
    pub fn clamped(value: i64) -> Self {
        Quality(value.clamp(1, 5) as u8)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns true if this score meets the completion threshold.
    pub fn is_sufficient(&self) -> bool {
        self.0 >= SUFFICIENT
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
