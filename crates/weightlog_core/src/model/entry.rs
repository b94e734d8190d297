//! Weight entry domain model.
//!
//! # Responsibility
//! - Define the canonical daily record: date, weight, optional metrics.
//! - Provide the validation contract enforced by repository writes.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another entry.
//! - `weight_lbs` is finite and strictly positive.
//! - `sleep_hours`, when present, lies within `[0, 24]`.
//! - Entries are immutable once persisted; correction is delete + re-add.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const SLEEP_HOURS_MAX: f64 = 24.0;

/// Stable identifier for a weight entry.
///
/// Assigned by storage at creation; aggregation never consults it.
pub type EntryId = Uuid;

/// Closed set of moods the user can attach to a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Neutral,
    Motivated,
    Tired,
    Relaxed,
}

impl Mood {
    /// All moods in display order.
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Neutral,
        Mood::Motivated,
        Mood::Tired,
        Mood::Relaxed,
    ];

    /// Stable lowercase text used for persistence.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Motivated => "motivated",
            Self::Tired => "tired",
            Self::Relaxed => "relaxed",
        }
    }

    /// Parses the persisted lowercase form. Returns `None` for unknown text.
    pub fn parse_db(value: &str) -> Option<Self> {
        match value {
            "happy" => Some(Self::Happy),
            "neutral" => Some(Self::Neutral),
            "motivated" => Some(Self::Motivated),
            "tired" => Some(Self::Tired),
            "relaxed" => Some(Self::Relaxed),
            _ => None,
        }
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_db_str())
    }
}

/// Validation failures for a weight entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidationError {
    /// Weight must be strictly positive.
    NonPositiveWeight(f64),
    /// Weight must be a finite number.
    WeightNotFinite,
    /// Sleep hours must lie within `[0, 24]`.
    SleepHoursOutOfRange(f64),
    /// Sleep hours must be a finite number.
    SleepHoursNotFinite,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveWeight(value) => {
                write!(f, "weight must be positive, got {value}")
            }
            Self::WeightNotFinite => write!(f, "weight must be a finite number"),
            Self::SleepHoursOutOfRange(value) => {
                write!(f, "sleep hours must be within 0..=24, got {value}")
            }
            Self::SleepHoursNotFinite => write!(f, "sleep hours must be a finite number"),
        }
    }
}

impl Error for EntryValidationError {}

/// Canonical daily record of weight plus optional health metrics.
///
/// Field absence is meaningful: `None` means the user did not record the
/// metric that day, never "zero" or "unknown string".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    /// Stable global ID assigned at creation.
    pub uuid: EntryId,
    /// Calendar date of the record, no time component.
    pub date: NaiveDate,
    /// Recorded weight in pounds.
    pub weight_lbs: f64,
    /// Free-form note for the day.
    pub notes: Option<String>,
    /// Hours slept, within `[0, 24]`.
    pub sleep_hours: Option<f64>,
    /// Steps taken.
    pub steps: Option<u32>,
    /// Estimated calorie intake.
    pub calories: Option<u32>,
    /// Mood for the day.
    pub mood: Option<Mood>,
}

impl WeightEntry {
    /// Creates a new entry with a generated stable ID and no optional
    /// metrics.
    pub fn new(date: NaiveDate, weight_lbs: f64) -> Self {
        Self::with_id(Uuid::new_v4(), date, weight_lbs)
    }

    /// Creates a new entry with a caller-provided stable ID.
    ///
    /// Used by import/test paths where identity already exists externally.
    pub fn with_id(uuid: EntryId, date: NaiveDate, weight_lbs: f64) -> Self {
        Self {
            uuid,
            date,
            weight_lbs,
            notes: None,
            sleep_hours: None,
            steps: None,
            calories: None,
            mood: None,
        }
    }

    /// Checks entry invariants.
    ///
    /// Repository write paths call this before any SQL mutation; read paths
    /// call it to reject invalid persisted state.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if !self.weight_lbs.is_finite() {
            return Err(EntryValidationError::WeightNotFinite);
        }
        if self.weight_lbs <= 0.0 {
            return Err(EntryValidationError::NonPositiveWeight(self.weight_lbs));
        }
        if let Some(sleep) = self.sleep_hours {
            if !sleep.is_finite() {
                return Err(EntryValidationError::SleepHoursNotFinite);
            }
            if !(0.0..=SLEEP_HOURS_MAX).contains(&sleep) {
                return Err(EntryValidationError::SleepHoursOutOfRange(sleep));
            }
        }
        Ok(())
    }
}
