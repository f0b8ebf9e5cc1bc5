//! Error types for the grade book.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{Field, Subject};

/// Input rejected by the add flow. Nothing is written when one of these is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required ({0} is missing).")]
    MissingField(Field),

    #[error("Marks must be numbers ({0} is not an integer).")]
    NonNumericMarks(Subject),
}

/// Failures while reading or writing the backing file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A stored row does not have exactly five fields.
    #[error("malformed row on line {line} of {path}: expected 5 fields, found {fields}")]
    MalformedRow {
        path: PathBuf,
        line: u64,
        fields: usize,
    },

    /// A stored mark is not an integer, so it cannot be aggregated. `record`
    /// counts data rows from 1, not physical lines.
    #[error("record {record} has a non-numeric {subject} mark: {value:?}")]
    InvalidMark {
        record: usize,
        subject: Subject,
        value: String,
    },
}

/// Outcome of a failed add. The two variants are kept apart so the UI can tell
/// a typo from a disk problem.
#[derive(Debug, Error)]
pub enum AddError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl AddError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AddError::Validation(_))
    }
}
