use std::fmt;

use crate::model::entry::{EntryError, PLACEHOLDER_EXERCISE};

/// Validated program label (trimmed, non-empty), e.g. "Leg Day".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramName(String);

impl ProgramName {
    /// Create a validated program name.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::EmptyProgramName` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, EntryError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EntryError::EmptyProgramName);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProgramName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated exercise label.
///
/// Never empty and never equal to the reserved placeholder marker, so a
/// real exercise can always be told apart from an empty program on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExerciseName(String);

impl ExerciseName {
    /// Create a validated exercise name.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::EmptyExerciseName` if the name is empty after trimming,
    /// or `EntryError::ReservedExerciseName` if it is the placeholder marker.
    pub fn new(value: impl Into<String>) -> Result<Self, EntryError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EntryError::EmptyExerciseName);
        }
        if trimmed == PLACEHOLDER_EXERCISE {
            return Err(EntryError::ReservedExerciseName);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExerciseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Load in kilograms. Always finite, non-negative and at most `Weight::MAX_KG`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Weight(f64);

impl Weight {
    pub const ZERO: Weight = Weight(0.0);

    /// Heaviest accepted load. Keeps `weight * reps` and its daily sums finite.
    pub const MAX_KG: f64 = 10_000.0;

    /// Create a validated weight.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::NonFiniteWeight` for NaN or infinite input,
    /// `EntryError::NegativeWeight` for values below zero and
    /// `EntryError::WeightTooLarge` above `Weight::MAX_KG`.
    pub fn new(kg: f64) -> Result<Self, EntryError> {
        if !kg.is_finite() {
            return Err(EntryError::NonFiniteWeight);
        }
        if kg < 0.0 {
            return Err(EntryError::NegativeWeight { weight: kg });
        }
        if kg > Self::MAX_KG {
            return Err(EntryError::WeightTooLarge { weight: kg });
        }
        // Normalise -0.0 so it prints as "0".
        Ok(Self(kg.abs()))
    }

    #[must_use]
    pub fn kg(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
