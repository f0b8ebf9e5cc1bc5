//! Persistence module split across logical submodules.

mod csv_file;

pub use csv_file::CsvFileStore;

use crate::error::StoreError;
use crate::models::{StudentRecord, StudentRow};

/// Durable append/load abstraction over the backing file. Implementations hold
/// no record state between calls: every `load_all` reflects what is on disk
/// right now.
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore {
    /// Persist one record after any previously appended ones. Either the whole
    /// row is written or none of it is.
    fn append(&self, record: &StudentRecord) -> Result<(), StoreError>;

    /// Every stored row in file order. A store that has never been written to
    /// yields an empty list.
    fn load_all(&self) -> Result<Vec<StudentRow>, StoreError>;
}
