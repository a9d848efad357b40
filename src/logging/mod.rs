//! Log sinks handed to the synchronizer
//!
//! The synchronizer never touches a global logger directly. It talks to a
//! [`SyncLog`], so every request can have its own sink.

use chrono::Local;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Error => "ERROR",
        };
        f.pad(label)
    }
}

/// Leveled logging interface used by the synchronizer
pub trait SyncLog {
    fn log(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

/// Forwards records to the global `tracing` subscriber
///
/// Request context (such as the title) comes from the span the caller enters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl SyncLog for TracingLog {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Debug => tracing::debug!("{}", message),
            Level::Info => tracing::info!("{}", message),
            Level::Error => tracing::error!("{}", message),
        }
    }
}

/// Appends timestamped lines to a dedicated log file
#[derive(Debug)]
pub struct FileLog {
    file: Mutex<File>,
    threshold: Level,
}

impl FileLog {
    /// Open (or create) `path` for appending
    ///
    /// With `debug` every record is written; otherwise debug records are dropped.
    pub fn open(path: &Path, debug: bool) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
            threshold: if debug { Level::Debug } else { Level::Info },
        })
    }
}

impl SyncLog for FileLog {
    fn log(&self, level: Level, message: &str) {
        if level < self.threshold {
            return;
        }
        let line = format!(
            "{} [{:<5}]  {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            level,
            message
        );
        if let Ok(mut file) = self.file.lock() {
            // A failing log write must not stop the backup.
            let _ = file.write_all(line.as_bytes());
        }
    }
}

/// A captured log record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
}

/// Keeps every record in memory
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Messages logged at exactly `level`
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .map(|r| r.message)
            .collect()
    }

    /// Check if some message at `level` contains `needle`
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.messages(level).iter().any(|m| m.contains(needle))
    }
}

impl SyncLog for MemoryLog {
    fn log(&self, level: Level, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(LogRecord {
                level,
                message: message.to_string(),
            });
        }
    }
}
