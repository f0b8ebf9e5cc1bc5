//! Core library surface for the Student Grades Manager TUI application.
//!
//! The modules exposed here keep the record store, validation, and query logic
//! independent from the terminal front-end, so the `bin` target and tests use
//! the same pieces.
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod query;
pub mod store;
pub mod ui;
pub mod validation;

// Startup configuration and logging setup used by `main.rs`.
pub use config::Config;
pub use logging::init_logging;

pub use error::{AddError, StoreError, ValidationError};
pub use models::{Field, StudentRecord, StudentRow, Subject};
pub use query::{search, statistics, GradeSummary, Gradebook, SubjectStats};
pub use store::{CsvFileStore, RecordStore};
pub use validation::RecordInput;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
