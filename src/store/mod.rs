//! Log history storage subsystem.
//!
//! # Data Flow
//! ```text
//! PeriodicEmitter ──store(timestamp, value)──▶ LogStorage backend
//!                                                  │
//! HTTP handlers ◀──get_all / get_latest(n)─────────┘
//! ```
//!
//! # Design Decisions
//! - Backends are interchangeable behind the `LogStorage` trait and
//!   selected once at construction (dependency injection)
//! - Reads hand out independent copies; callers can never alias or
//!   mutate internal state
//! - Exclusive lock for writes, shared lock for reads; locks are never
//!   held across blocking I/O

pub mod file;
pub mod memory;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use file::FileStore;
pub use memory::MemoryStore;

/// A single emitted log record. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    /// Wall-clock time captured at emission, RFC 3339 on the wire.
    pub timestamp: DateTime<Utc>,

    /// Emitted payload.
    pub value: String,
}

/// Error type for storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to persist log entry: {0}")]
    Io(#[from] std::io::Error),
}

/// Append-only ordered log of (timestamp, value) entries.
///
/// Every `store` call is serialized relative to all other calls; reads
/// may run concurrently with each other but never observe a partially
/// written entry.
pub trait LogStorage: Send + Sync {
    /// Append one entry. On success the history grows by exactly one.
    fn store(&self, timestamp: DateTime<Utc>, value: &str) -> Result<(), StorageError>;

    /// Full history, oldest first, as an independent copy.
    fn get_all(&self) -> Vec<LogEntry>;

    /// Last `min(n, len)` entries in original order. `n` larger than the
    /// current length returns the whole history; `n == 0` returns nothing.
    fn get_latest(&self, n: usize) -> Vec<LogEntry>;
}
