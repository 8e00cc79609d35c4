#![forbid(unsafe_code)]

pub mod csv_store;
pub mod repository;

pub use csv_store::CsvRecordStore;
pub use repository::{InMemoryRecordStore, RecordStore, Storage, StorageError};
