use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use workout_core::model::{Entry, RecordError};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// A row could not be encoded while writing.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The stored file does not have the expected tabular shape.
    #[error("malformed record file: {0}")]
    Malformed(String),

    #[error("corrupt record on line {line}: {source}")]
    Corrupt {
        line: u64,
        #[source]
        source: RecordError,
    },
}

impl StorageError {
    /// True for failures of the underlying medium (permissions, disk full, ...).
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, StorageError::Io(_))
    }
}

/// Durable home of the full, ordered entry collection.
///
/// Stores are whole-collection: `save` replaces everything previously saved.
pub trait RecordStore: Send + Sync {
    /// Load every stored entry in insertion order.
    ///
    /// Returns an empty list when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the backing medium cannot be read,
    /// `StorageError::Malformed` if the file is not a valid record table, or
    /// `StorageError::Corrupt` if a stored row cannot be interpreted.
    fn load(&self) -> Result<Vec<Entry>, StorageError>;

    /// Replace the stored collection with `entries`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the backing medium is unwritable. The
    /// previously saved collection is left intact in that case.
    fn save(&self, entries: &[Entry]) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and prototyping.
///
/// Clones share the same underlying collection.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    entries: Arc<Mutex<Vec<Entry>>>,
    read_only: Arc<AtomicBool>,
}

impl InMemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already populated collection.
    #[must_use]
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
            read_only: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every following `save` fail with a permission error.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Copy of what is currently "on disk".
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the lock is poisoned.
    pub fn snapshot(&self) -> Result<Vec<Entry>, StorageError> {
        self.load()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Io(io::Error::other(e.to_string()))
}

impl RecordStore for InMemoryRecordStore {
    fn load(&self) -> Result<Vec<Entry>, StorageError> {
        let guard = self.entries.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, entries: &[Entry]) -> Result<(), StorageError> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "in-memory store is read-only",
            )));
        }
        let mut guard = self.entries.lock().map_err(poisoned)?;
        *guard = entries.to_vec();
        Ok(())
    }
}

/// Bundles the record store behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub records: Arc<dyn RecordStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let records: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
        Self { records }
    }
}
