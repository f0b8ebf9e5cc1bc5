use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".student-grades-manager";
/// Student records file stored inside the application data directory.
const DATA_FILE_NAME: &str = "students.csv";
/// Log file kept next to the records, since the TUI owns the terminal.
const LOG_FILE_NAME: &str = "student-grades-manager.log";

/// Paths fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
}

impl Config {
    /// Resolve the default layout inside the user's home directory.
    pub fn resolve() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::with_data_dir(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Same layout rooted at an arbitrary directory.
    pub fn with_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            data_file: dir.join(DATA_FILE_NAME),
            log_file: dir.join(LOG_FILE_NAME),
        }
    }
}
