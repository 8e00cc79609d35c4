use chrono::NaiveDate;
use thiserror::Error;

use crate::model::ids::EntryId;
use crate::model::names::{ExerciseName, ProgramName, Weight};

/// Exercise label that marks an empty program in the tabular record form.
pub const PLACEHOLDER_EXERCISE: &str = "Start";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum EntryError {
    #[error("program name cannot be empty")]
    EmptyProgramName,

    #[error("exercise name cannot be empty")]
    EmptyExerciseName,

    #[error("exercise name \"Start\" is reserved for empty programs")]
    ReservedExerciseName,

    #[error("weight must be >= 0, got {weight}")]
    NegativeWeight { weight: f64 },

    #[error("weight must be at most 10000 kg, got {weight}")]
    WeightTooLarge { weight: f64 },

    #[error("weight must be a finite number")]
    NonFiniteWeight,

    #[error("reps must be >= 0, got {reps}")]
    NegativeReps { reps: i64 },

    #[error("reps out of range: {reps}")]
    RepsOutOfRange { reps: i64 },
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// One row of the workout log.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A program that exists on a date but has no exercises logged yet.
    Placeholder { date: NaiveDate, program: ProgramName },
    /// A logged exercise set.
    Exercise {
        date: NaiveDate,
        program: ProgramName,
        exercise: ExerciseName,
        weight: Weight,
        reps: u32,
    },
}

impl Entry {
    #[must_use]
    pub fn placeholder(date: NaiveDate, program: ProgramName) -> Self {
        Self::Placeholder { date, program }
    }

    #[must_use]
    pub fn exercise(date: NaiveDate, program: ProgramName, set: ExerciseSet) -> Self {
        Self::Exercise {
            date,
            program,
            exercise: set.exercise,
            weight: set.weight,
            reps: set.reps,
        }
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Entry::Placeholder { date, .. } | Entry::Exercise { date, .. } => *date,
        }
    }

    #[must_use]
    pub fn program(&self) -> &ProgramName {
        match self {
            Entry::Placeholder { program, .. } | Entry::Exercise { program, .. } => program,
        }
    }

    /// Exercise label, or `None` for placeholders.
    #[must_use]
    pub fn exercise_name(&self) -> Option<&ExerciseName> {
        match self {
            Entry::Placeholder { .. } => None,
            Entry::Exercise { exercise, .. } => Some(exercise),
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Entry::Placeholder { .. })
    }

    /// True if this entry belongs to the given (date, program) pair.
    #[must_use]
    pub fn belongs_to(&self, date: NaiveDate, program: &ProgramName) -> bool {
        self.date() == date && self.program() == program
    }

    /// Training volume (`weight * reps`); `None` for placeholders.
    #[must_use]
    pub fn volume(&self) -> Option<f64> {
        match self {
            Entry::Placeholder { .. } => None,
            Entry::Exercise { weight, reps, .. } => Some(weight.kg() * f64::from(*reps)),
        }
    }
}

/// An entry together with the id the log assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedEntry {
    id: EntryId,
    entry: Entry,
}

impl LoggedEntry {
    #[must_use]
    pub fn new(id: EntryId, entry: Entry) -> Self {
        Self { id, entry }
    }

    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    #[must_use]
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    #[must_use]
    pub fn into_entry(self) -> Entry {
        self.entry
    }
}

//
// ─── DRAFTS ────────────────────────────────────────────────────────────────────
//

/// Unvalidated exercise input as collected from a form or command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDraft {
    pub exercise_name: String,
    pub weight: f64,
    pub reps: i64,
}

impl ExerciseDraft {
    #[must_use]
    pub fn new(exercise_name: impl Into<String>, weight: f64, reps: i64) -> Self {
        Self {
            exercise_name: exercise_name.into(),
            weight,
            reps,
        }
    }

    /// Validate the draft into an `ExerciseSet`.
    ///
    /// # Errors
    ///
    /// Returns `EntryError` if the name is empty or reserved, the weight is
    /// negative, too large or not finite, or reps are negative or exceed `u32`.
    pub fn validate(self) -> Result<ExerciseSet, EntryError> {
        let exercise = ExerciseName::new(self.exercise_name)?;
        let weight = Weight::new(self.weight)?;
        if self.reps < 0 {
            return Err(EntryError::NegativeReps { reps: self.reps });
        }
        let reps = u32::try_from(self.reps)
            .map_err(|_| EntryError::RepsOutOfRange { reps: self.reps })?;
        Ok(ExerciseSet {
            exercise,
            weight,
            reps,
        })
    }
}

/// Validated exercise input.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSet {
    pub exercise: ExerciseName,
    pub weight: Weight,
    pub reps: u32,
}
