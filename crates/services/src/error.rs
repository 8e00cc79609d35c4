//! Shared error types for the services crate.

use chrono::NaiveDate;
use thiserror::Error;

use storage::StorageError;
use workout_core::model::{EntryError, EntryId, EntryKey, ProgramName};

/// Errors emitted by `WorkoutLog`.
///
/// Every failure leaves the in-memory log exactly as it was before the call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LogError {
    #[error("program {program} already exists on {date}")]
    AlreadyExists { date: NaiveDate, program: ProgramName },
    #[error("entry {0} not found")]
    NotFound(EntryId),
    #[error("no entry matches {0}")]
    KeyNotFound(EntryKey),
    #[error(transparent)]
    Validation(#[from] EntryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Coarse classification of a `LogError` for display and retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogErrorKind {
    AlreadyExists,
    Validation,
    NotFound,
    Io,
    DataCorruption,
}

impl LogError {
    #[must_use]
    pub fn kind(&self) -> LogErrorKind {
        match self {
            LogError::AlreadyExists { .. } => LogErrorKind::AlreadyExists,
            LogError::NotFound(_) | LogError::KeyNotFound(_) => LogErrorKind::NotFound,
            LogError::Validation(_) => LogErrorKind::Validation,
            LogError::Storage(StorageError::Corrupt { .. } | StorageError::Malformed(_)) => {
                LogErrorKind::DataCorruption
            }
            // Serialization only happens on the write path.
            LogError::Storage(_) => LogErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workout_core::model::RecordError;

    #[test]
    fn storage_errors_are_classified() {
        let io = LogError::from(StorageError::Io(std::io::Error::other("disk full")));
        assert_eq!(io.kind(), LogErrorKind::Io);

        let corrupt = LogError::from(StorageError::Corrupt {
            line: 4,
            source: RecordError::InvalidReps { raw: "x".into() },
        });
        assert_eq!(corrupt.kind(), LogErrorKind::DataCorruption);

        let malformed = LogError::from(StorageError::Malformed("missing column".into()));
        assert_eq!(malformed.kind(), LogErrorKind::DataCorruption);

        let encode = LogError::from(StorageError::Serialization("bad field".into()));
        assert_eq!(encode.kind(), LogErrorKind::Io);

        let invalid = LogError::from(EntryError::EmptyExerciseName);
        assert_eq!(invalid.kind(), LogErrorKind::Validation);
    }
}
