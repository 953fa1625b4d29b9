use chrono::{DateTime, Local};
use log::error;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d, %H:%M:%S";

/// Append-only, line-per-event text log.
///
/// The file is opened for every line and closed right after, so nothing is
/// buffered between calls.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a line stamped with the current local time.
    ///
    /// Write failures are reported to the diagnostic log and otherwise ignored.
    pub fn write(&self, msg: &str) {
        if let Err(e) = self.write_at(Local::now(), msg) {
            error!("Failed to write to log file {}: {}", self.path.display(), e);
        }
    }

    pub fn write_at(&self, time: DateTime<Local>, msg: &str) -> std::io::Result<()> {
        let entry = format!("{} - {}\n", time.format(TIMESTAMP_FORMAT), msg);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.write_all(entry.as_bytes())?;
        file.flush()
    }
}
