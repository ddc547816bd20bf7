//! In-memory log storage.

use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::store::{LogEntry, LogStorage, StorageError};

/// In-memory backend: a growable vector behind a read/write lock.
///
/// Appends never fail; the error in the trait signature exists for
/// backends that actually persist.
pub struct MemoryStore {
    entries: RwLock<Vec<LogEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LogStorage for MemoryStore {
    fn store(&self, timestamp: DateTime<Utc>, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().expect("log store lock poisoned");
        entries.push(LogEntry {
            timestamp,
            value: value.to_string(),
        });
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn store_appends_in_order() {
        let store = MemoryStore::new();
        store.store(ts(1), "a").unwrap();
        store.store(ts(2), "b").unwrap();

        let all = store.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].value, "a");
        assert_eq!(all[1].value, "b");
        assert_eq!(all[1].timestamp, ts(2));
    }

    #[test]
    fn store_grows_length_by_one() {
        let store = MemoryStore::new();
        for i in 0..5 {
            let before = store.get_all().len();
            store.store(ts(i), "x").unwrap();
            let all = store.get_all();
            assert_eq!(all.len(), before + 1);
            assert_eq!(all.last().unwrap().timestamp, ts(i));
        }
    }

    #[test]
    fn get_latest_is_tail_of_get_all() {
        let store = MemoryStore::new();
        for i in 0..10 {
            store.store(ts(i), &format!("v{i}")).unwrap();
        }

        let all = store.get_all();
        for n in 0..=12 {
            let latest = store.get_latest(n);
            assert_eq!(latest.len(), n.min(10));
            assert_eq!(latest.as_slice(), &all[all.len() - latest.len()..]);
        }
    }

    #[test]
    fn get_latest_zero_is_empty() {
        let store = MemoryStore::new();
        store.store(ts(1), "a").unwrap();
        assert!(store.get_latest(0).is_empty());
    }

    #[test]
    fn get_latest_beyond_length_returns_everything() {
        let store = MemoryStore::new();
        store.store(ts(1), "a").unwrap();
        store.store(ts(2), "b").unwrap();
        assert_eq!(store.get_latest(100).len(), 2);
    }

    #[test]
    fn returned_copies_are_isolated() {
        let store = MemoryStore::new();
        store.store(ts(1), "a").unwrap();

        let mut copy = store.get_all();
        copy[0].value = "mutated".to_string();
        copy.clear();

        assert_eq!(store.get_all()[0].value, "a");
        assert_eq!(store.get_latest(1)[0].value, "a");
    }

    #[test]
    fn concurrent_writers_and_readers() {
        let store = Arc::new(MemoryStore::new());
        let writers = 4;
        let per_writer = 1000;

        let mut handles = Vec::new();
        for w in 0..writers {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..per_writer {
                    store.store(ts(i as i64), &format!("w{w}-{i}")).unwrap();
                }
            }));
        }
        for _ in 0..2 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..500 {
                    // Every observed snapshot must be fully-formed entries.
                    for entry in store.get_latest(16) {
                        assert!(!entry.value.is_empty());
                    }
                    let _ = store.get_all();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.get_all().len(), writers * per_writer);
    }
}
