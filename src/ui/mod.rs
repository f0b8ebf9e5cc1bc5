//! Ratatui front-end: a student table with an add form, a search bar, and a
//! statistics dialog layered on top.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
