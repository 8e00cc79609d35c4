use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use storage::{RecordStore, Storage};
use tracing::{info, warn};
use workout_core::model::{
    Entry, EntryId, EntryIdGenerator, EntryKey, ExerciseDraft, LoggedEntry, ProgramName,
};

use crate::error::LogError;

//
// ─── WORKOUT LOG ───────────────────────────────────────────────────────────────
//

/// In-memory workout log with write-through persistence.
///
/// The log owns its entries exclusively. Every mutation builds the next
/// state, saves it, and only then swaps it in, so a failed save leaves both
/// the log and the stored copy untouched.
pub struct WorkoutLog {
    store: Arc<dyn RecordStore>,
    pub(super) entries: Vec<LoggedEntry>,
    ids: EntryIdGenerator,
}

impl std::fmt::Debug for WorkoutLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkoutLog")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl WorkoutLog {
    /// Load the log from a record store.
    ///
    /// Placeholders that sit next to real exercises of the same program, and
    /// repeated placeholders, are dropped. They are written back on the next
    /// mutation.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Storage` if the store cannot be read.
    pub fn open(store: Arc<dyn RecordStore>) -> Result<Self, LogError> {
        let loaded = store.load()?;
        let total = loaded.len();
        let kept = drop_stale_placeholders(loaded);
        if kept.len() < total {
            warn!(
                dropped = total - kept.len(),
                "ignoring placeholders of programs that already have exercises"
            );
        }

        let mut ids = EntryIdGenerator::new();
        let entries: Vec<_> = kept
            .into_iter()
            .map(|entry| LoggedEntry::new(ids.next_id(), entry))
            .collect();
        info!(entries = entries.len(), "opened workout log");

        Ok(Self {
            store,
            entries,
            ids,
        })
    }

    /// Open the log on the record store of a `Storage` bundle.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Storage` if the store cannot be read.
    pub fn from_storage(storage: &Storage) -> Result<Self, LogError> {
        Self::open(Arc::clone(&storage.records))
    }

    /// Create an empty program on a date.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Validation` for an empty program name,
    /// `LogError::AlreadyExists` if any entry already exists for the pair, and
    /// `LogError::Storage` if persisting fails.
    pub fn create_program(
        &mut self,
        date: NaiveDate,
        program: impl Into<String>,
    ) -> Result<EntryId, LogError> {
        let program = ProgramName::new(program)?;
        if self
            .entries
            .iter()
            .any(|e| e.entry().belongs_to(date, &program))
        {
            return Err(LogError::AlreadyExists { date, program });
        }

        let mut ids = self.ids.clone();
        let id = ids.next_id();
        let mut next = self.entries.clone();
        next.push(LoggedEntry::new(id, Entry::placeholder(date, program.clone())));
        self.commit(next, ids)?;

        info!(%date, %program, %id, "created program");
        Ok(id)
    }

    /// Log an exercise set for a program on a date.
    ///
    /// The program does not need to exist beforehand. If it only had a
    /// placeholder, the placeholder is removed in the same step.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Validation` if the program name or draft is invalid,
    /// and `LogError::Storage` if persisting fails.
    pub fn add_exercise(
        &mut self,
        date: NaiveDate,
        program: impl Into<String>,
        draft: ExerciseDraft,
    ) -> Result<EntryId, LogError> {
        let program = ProgramName::new(program)?;
        let set = draft.validate()?;

        let mut ids = self.ids.clone();
        let id = ids.next_id();
        let exercise = set.exercise.clone();
        let mut next: Vec<LoggedEntry> = self
            .entries
            .iter()
            .filter(|e| !(e.entry().is_placeholder() && e.entry().belongs_to(date, &program)))
            .cloned()
            .collect();
        next.push(LoggedEntry::new(id, Entry::exercise(date, program.clone(), set)));
        self.commit(next, ids)?;

        info!(%date, %program, %exercise, %id, "logged exercise");
        Ok(id)
    }

    /// Remove exactly the referenced entry.
    ///
    /// Removing the last exercise of a program does not bring its placeholder
    /// back; the program is simply gone from that date.
    ///
    /// # Errors
    ///
    /// Returns `LogError::NotFound` if no entry has this id, and
    /// `LogError::Storage` if persisting fails.
    pub fn delete_entry(&mut self, id: EntryId) -> Result<Entry, LogError> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id() == id)
            .ok_or(LogError::NotFound(id))?;

        let mut next = self.entries.clone();
        let removed = next.remove(pos).into_entry();
        let ids = self.ids.clone();
        self.commit(next, ids)?;

        info!(%id, date = %removed.date(), program = %removed.program(), "deleted entry");
        Ok(removed)
    }

    /// Remove the entry a content key points at.
    ///
    /// Keys survive reopening the log, so this is the delete to use when the
    /// reference came from an earlier session. Once the entry is gone the
    /// same key no longer matches it.
    ///
    /// # Errors
    ///
    /// Returns `LogError::KeyNotFound` if no entry matches the key, and
    /// `LogError::Storage` if persisting fails.
    pub fn delete_by_key(&mut self, key: &EntryKey) -> Result<Entry, LogError> {
        let id = self
            .find(key)
            .map(LoggedEntry::id)
            .ok_or_else(|| LogError::KeyNotFound(key.clone()))?;
        self.delete_entry(id)
    }

    fn commit(&mut self, next: Vec<LoggedEntry>, ids: EntryIdGenerator) -> Result<(), LogError> {
        let rows: Vec<Entry> = next.iter().map(|e| e.entry().clone()).collect();
        if let Err(e) = self.store.save(&rows) {
            warn!(error = %e, "failed to persist workout log; keeping previous state");
            return Err(e.into());
        }
        self.entries = next;
        self.ids = ids;
        Ok(())
    }
}

fn drop_stale_placeholders(entries: Vec<Entry>) -> Vec<Entry> {
    let active: HashSet<(NaiveDate, ProgramName)> = entries
        .iter()
        .filter(|e| !e.is_placeholder())
        .map(|e| (e.date(), e.program().clone()))
        .collect();
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| {
            if !e.is_placeholder() {
                return true;
            }
            let key = (e.date(), e.program().clone());
            !active.contains(&key) && seen.insert(key)
        })
        .collect()
}
