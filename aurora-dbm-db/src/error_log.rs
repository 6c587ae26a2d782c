//! Append-only text log of failed store operations.

use std::error::Error;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

/// Default file name, relative to the working directory.
pub const DEFAULT_ERROR_LOG: &str = "error.log";

/// Writes one `[timestamp]: message` line per failure.
///
/// The message includes the whole `source` chain. Failing to write the
/// log is reported through `log::warn!` and never surfaces as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLog {
    path: Option<PathBuf>,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A log that drops every entry.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn record(&self, error: &(dyn Error + 'static)) {
        let Some(path) = &self.path else {
            return;
        };

        let line = format!(
            "[{}]: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            describe(error)
        );
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
        if let Err(e) = written {
            log::warn!("Could not write error log {}: {e}", path.display());
        }
    }

    /// Record the error of a failed result and pass the result through.
    pub fn logged<T, E: Error + 'static>(&self, result: Result<T, E>) -> Result<T, E> {
        if let Err(e) = &result {
            self.record(e);
        }
        result
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_LOG)
    }
}

/// The error followed by each distinct source message.
fn describe(error: &(dyn Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        if !text.contains(&message) {
            text.push_str(": ");
            text.push_str(&message);
        }
        source = cause.source();
    }
    text
}
