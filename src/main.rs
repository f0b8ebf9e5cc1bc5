//! Binary entry point that glues the CSV-backed grade book to the TUI: resolve
//! paths, start logging, load every stored record, and drive the Ratatui event
//! loop until the user exits.
use student_grades_manager::{init_logging, run_app, App, Config, CsvFileStore, Gradebook};
use tracing::info;

/// Returning a `Result` bubbles fatal startup problems (no home directory, an
/// unwritable log file, a broken terminal) up to the shell instead of crashing
/// silently.
fn main() -> anyhow::Result<()> {
    let config = Config::resolve()?;
    init_logging(&config)?;
    info!(data_file = %config.data_file.display(), "starting student grades manager");

    let gradebook = Gradebook::new(CsvFileStore::new(&config.data_file));
    let mut app = App::load(gradebook);
    run_app(&mut app)
}
