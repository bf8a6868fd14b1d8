//! Log file for one processing run.
//!
//! Opened when a run starts and closed when it ends. Lines look like
//! `2024-05-01 10:00:00,123 | INFO | Mass processing started`.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::LogLevel;

/// Append-only log file with level filtering.
pub struct RunLogger {
    /// Path to log file.
    log_path: PathBuf,
    /// Minimum level written.
    level: LogLevel,
    /// File writer (buffered). `None` once closed.
    file_writer: Mutex<Option<BufWriter<File>>>,
}

impl RunLogger {
    /// Open (or create) the log file at `log_path`, appending to it.
    pub fn open(log_path: impl Into<PathBuf>, level: LogLevel) -> std::io::Result<Self> {
        let log_path = log_path.into();

        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        Ok(Self {
            log_path,
            level,
            file_writer: Mutex::new(Some(BufWriter::new(file))),
        })
    }

    /// Get the log file path.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.level {
            return;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writeln!(writer, "{} | {} | {}", timestamp, level.label(), message);
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Flush the log file.
    pub fn flush(&self) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writer.flush();
        }
    }

    /// Flush and close. Later messages are dropped.
    pub fn close(&self) {
        self.flush();
        *self.file_writer.lock() = None;
    }
}

impl Drop for RunLogger {
    fn drop(&mut self) {
        self.close();
    }
}
