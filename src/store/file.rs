//! File-backed log storage.
//!
//! Serves reads from the same in-memory vector as [`MemoryStore`] and
//! additionally appends one plain-text line per entry to a log file,
//! flushed to disk before `store` returns. A crash after a successful
//! `store` call never loses that line.
//!
//! [`MemoryStore`]: crate::store::MemoryStore

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::store::{LogEntry, LogStorage, StorageError};

pub struct FileStore {
    entries: RwLock<Vec<LogEntry>>,
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            path: path.into(),
        }
    }

    /// Append `<RFC3339>: <value>` and fsync. Runs outside the entries
    /// lock so readers are never blocked on disk.
    fn write_line(&self, timestamp: DateTime<Utc>, value: &str) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        // Single write_all call so concurrent appends cannot interleave
        // fragments of two lines.
        let line = format!(
            "{}: {}\n",
            timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            value
        );
        file.write_all(line.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }
}

impl LogStorage for FileStore {
    fn store(&self, timestamp: DateTime<Utc>, value: &str) -> Result<(), StorageError> {
        {
            let mut entries = self.entries.write().expect("log store lock poisoned");
            entries.push(LogEntry {
                timestamp,
                value: value.to_string(),
            });
        }
        self.write_line(timestamp, value)
    }

    fn get_all(&self) -> Vec<LogEntry> {
        let entries = self.entries.read().expect("log store lock poisoned");
        entries.clone()
    }

    fn get_latest(&self, n: usize) -> Vec<LogEntry> {
        let entries = self.entries.read().expect("log store lock poisoned");
        let n = n.min(entries.len());
        entries[entries.len() - n..].to_vec()
    }
}
