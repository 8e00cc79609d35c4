mod entry;
mod ids;
mod key;
mod names;
pub mod record;

pub use entry::{Entry, EntryError, ExerciseDraft, ExerciseSet, LoggedEntry, PLACEHOLDER_EXERCISE};
pub use ids::{EntryId, EntryIdGenerator};
pub use key::EntryKey;
pub use names::{ExerciseName, ProgramName, Weight};
pub use record::{EntryRecord, RECORD_COLUMNS, RecordError};
