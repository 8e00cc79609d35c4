use std::cmp::Reverse;
use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use workout_core::model::{EntryId, EntryKey, ExerciseName, LoggedEntry, ProgramName};
use workout_core::{DailyVolume, daily_volume};

use super::service::WorkoutLog;
use super::state::ProgramState;

impl WorkoutLog {
    /// All entries in store order.
    #[must_use]
    pub fn entries(&self) -> &[LoggedEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&LoggedEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Content key of an entry, for referring to it after the log is reopened.
    #[must_use]
    pub fn key_of(&self, id: EntryId) -> Option<EntryKey> {
        let pos = self.entries.iter().position(|e| e.id() == id)?;
        let entry = self.entries[pos].entry();
        let earlier = self.entries[..pos]
            .iter()
            .filter(|e| {
                e.entry().belongs_to(entry.date(), entry.program())
                    && e.entry().exercise_name() == entry.exercise_name()
            })
            .count();
        Some(EntryKey::new(
            entry.date(),
            entry.program().clone(),
            entry.exercise_name().cloned(),
            u32::try_from(earlier + 1).unwrap_or(u32::MAX),
        ))
    }

    /// Entry a content key points at, if it is still in the log.
    #[must_use]
    pub fn find(&self, key: &EntryKey) -> Option<&LoggedEntry> {
        let skip = usize::try_from(key.occurrence() - 1).unwrap_or(usize::MAX);
        self.entries
            .iter()
            .filter(|e| key.matches(e.entry()))
            .nth(skip)
    }

    /// Entries on a date, placeholders included, in store order.
    #[must_use]
    pub fn entries_for(&self, date: NaiveDate) -> Vec<&LoggedEntry> {
        self.entries
            .iter()
            .filter(|e| e.entry().date() == date)
            .collect()
    }

    /// Distinct program names on a date, including placeholder-only programs.
    #[must_use]
    pub fn programs_for(&self, date: NaiveDate) -> BTreeSet<ProgramName> {
        self.entries
            .iter()
            .filter(|e| e.entry().date() == date)
            .map(|e| e.entry().program().clone())
            .collect()
    }

    /// Real exercise entries of a program on a date, in store order.
    #[must_use]
    pub fn exercises_for(&self, date: NaiveDate, program: &str) -> Vec<&LoggedEntry> {
        let program = program.trim();
        self.entries
            .iter()
            .filter(|e| {
                let entry = e.entry();
                !entry.is_placeholder()
                    && entry.date() == date
                    && entry.program().as_str() == program
            })
            .collect()
    }

    #[must_use]
    pub fn program_state(&self, date: NaiveDate, program: &str) -> ProgramState {
        let program = program.trim();
        let mut state = ProgramState::Absent;
        for e in &self.entries {
            let entry = e.entry();
            if entry.date() != date || entry.program().as_str() != program {
                continue;
            }
            if !entry.is_placeholder() {
                return ProgramState::Active;
            }
            state = ProgramState::Placeholder;
        }
        state
    }

    /// Volume per date over the whole log, oldest date first.
    #[must_use]
    pub fn daily_volume(&self) -> Vec<DailyVolume> {
        daily_volume(self.entries.iter().map(LoggedEntry::entry))
    }

    /// Every logged set of one exercise, newest date first.
    ///
    /// Sets from the same date keep their store order.
    #[must_use]
    pub fn history_for(&self, exercise: &str) -> Vec<&LoggedEntry> {
        let exercise = exercise.trim();
        let mut history: Vec<_> = self
            .entries
            .iter()
            .filter(|e| {
                e.entry()
                    .exercise_name()
                    .is_some_and(|name| name.as_str() == exercise)
            })
            .collect();
        history.sort_by_key(|e| Reverse(e.entry().date()));
        history
    }

    /// The `limit` most recent exercise sets, newest date first.
    ///
    /// Within a date, the most recently logged set comes first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<&LoggedEntry> {
        let mut recent: Vec<_> = self
            .entries
            .iter()
            .rev()
            .filter(|e| !e.entry().is_placeholder())
            .collect();
        recent.sort_by_key(|e| Reverse(e.entry().date()));
        recent.truncate(limit);
        recent
    }

    /// Distinct exercise names in order of first appearance.
    #[must_use]
    pub fn exercise_names(&self) -> Vec<ExerciseName> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter_map(|e| e.entry().exercise_name())
            .filter(|name| seen.insert(*name))
            .cloned()
            .collect()
    }
}
