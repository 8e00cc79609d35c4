use std::fmt;

use chrono::NaiveDate;

use crate::model::entry::Entry;
use crate::model::names::{ExerciseName, ProgramName};

/// Reference to an entry by its content, stable across reloads of the log.
///
/// Entries are matched on date, program and exercise (`None` addresses the
/// placeholder of an empty program). `occurrence` picks the n-th match in
/// stored order, counting from 1, for repeated sets of the same exercise.
/// Deleting unrelated rows never changes what a key points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    date: NaiveDate,
    program: ProgramName,
    exercise: Option<ExerciseName>,
    occurrence: u32,
}

impl EntryKey {
    /// Build a key; an `occurrence` of 0 is treated as 1.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        program: ProgramName,
        exercise: Option<ExerciseName>,
        occurrence: u32,
    ) -> Self {
        Self {
            date,
            program,
            exercise,
            occurrence: occurrence.max(1),
        }
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn program(&self) -> &ProgramName {
        &self.program
    }

    #[must_use]
    pub fn exercise(&self) -> Option<&ExerciseName> {
        self.exercise.as_ref()
    }

    #[must_use]
    pub fn occurrence(&self) -> u32 {
        self.occurrence
    }

    /// True if the entry has this key's date, program and exercise.
    ///
    /// Ignores `occurrence`, which only has meaning within a whole log.
    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        entry.belongs_to(self.date, &self.program) && entry.exercise_name() == self.exercise.as_ref()
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.exercise {
            Some(exercise) => write!(
                f,
                "{} / {} / {} #{}",
                self.date, self.program, exercise, self.occurrence
            ),
            None => write!(f, "{} / {} (empty) #{}", self.date, self.program, self.occurrence),
        }
    }
}
