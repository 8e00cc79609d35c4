use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;
use tracing::debug;
use workout_core::model::{Entry, EntryRecord, RECORD_COLUMNS};

use crate::repository::{RecordStore, Storage, StorageError};

/// Record store backed by a single UTF-8 CSV file.
///
/// The file is rewritten wholesale on every save. Writes go to a sibling
/// temporary file that is renamed over the target only once fully written.
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    path: PathBuf,
}

fn csv_read_err(e: csv::Error) -> StorageError {
    let message = e.to_string();
    match e.into_kind() {
        csv::ErrorKind::Io(io) => StorageError::Io(io),
        _ => StorageError::Malformed(message),
    }
}

fn csv_write_err(e: csv::Error) -> StorageError {
    let message = e.to_string();
    match e.into_kind() {
        csv::ErrorKind::Io(io) => StorageError::Io(io),
        _ => StorageError::Serialization(message),
    }
}

impl CsvRecordStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self, file: File) -> Result<Vec<Entry>, StorageError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(file);

        let headers = reader.headers().map_err(csv_read_err)?.clone();
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        for column in RECORD_COLUMNS {
            if !headers.iter().any(|h| h.trim() == column) {
                return Err(StorageError::Malformed(format!(
                    "missing column {column:?} in {}",
                    self.path.display()
                )));
            }
        }
        let headers = csv::StringRecord::from(
            headers.iter().map(str::trim).collect::<Vec<_>>(),
        );

        let mut entries = Vec::new();
        for row in reader.records() {
            let row = row.map_err(csv_read_err)?;
            let line = row.position().map_or(0, csv::Position::line);
            let record: EntryRecord = row.deserialize(Some(&headers)).map_err(csv_read_err)?;
            let entry = record
                .into_entry()
                .map_err(|source| StorageError::Corrupt { line, source })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    fn write_entries(out: impl Write, entries: &[Entry]) -> Result<(), StorageError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);
        writer.write_record(RECORD_COLUMNS).map_err(csv_write_err)?;
        for entry in entries {
            writer
                .serialize(EntryRecord::from_entry(entry))
                .map_err(csv_write_err)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Replace the file with whatever `write` produces, or leave it alone.
    ///
    /// The content goes to a temporary sibling that takes over the target's
    /// permissions and is renamed over it only after `write` and a sync
    /// succeed. On any error the temporary file is removed.
    fn replace_with<F>(&self, write: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut File) -> Result<(), StorageError>,
    {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        write(tmp.as_file_mut())?;
        tmp.as_file().sync_all()?;
        match fs::metadata(&self.path) {
            Ok(meta) => tmp.as_file().set_permissions(meta.permissions())?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }
}

impl RecordStore for CsvRecordStore {
    fn load(&self) -> Result<Vec<Entry>, StorageError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no record file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let entries = self.read_entries(file)?;
        debug!(path = %self.path.display(), rows = entries.len(), "loaded records");
        Ok(entries)
    }

    fn save(&self, entries: &[Entry]) -> Result<(), StorageError> {
        self.replace_with(|out| Self::write_entries(out, entries))?;
        debug!(path = %self.path.display(), rows = entries.len(), "saved records");
        Ok(())
    }
}

impl Storage {
    /// Build a `Storage` backed by a CSV file at `path`.
    ///
    /// The file does not need to exist yet.
    #[must_use]
    pub fn csv(path: impl Into<PathBuf>) -> Self {
        let records: Arc<dyn RecordStore> = Arc::new(CsvRecordStore::new(path));
        Self { records }
    }
}
