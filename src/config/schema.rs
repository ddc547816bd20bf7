//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! service. All types derive Serde traits for deserialization from
//! config files, and every field has a default so a minimal (or absent)
//! config file is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Periodic emitter settings.
    pub emitter: EmitterConfig,

    /// Log storage backend selection.
    pub storage: StorageConfig,

    /// Shutdown deadlines.
    pub shutdown: ShutdownConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8091").
    pub bind_address: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8091".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Periodic emitter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Emission interval in milliseconds.
    pub interval_ms: u64,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

/// Which log storage backend to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend selection; `file` also persists entries to `path`.
    pub backend: StorageBackend,

    /// Log file path, required when backend = "file".
    pub path: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: None,
        }
    }
}

/// Shutdown deadline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Bound on waiting for background workers to stop, in seconds.
    pub worker_wait_secs: u64,

    /// Bound on draining in-flight HTTP requests, in seconds.
    pub drain_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            worker_wait_secs: 10,
            drain_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8091");
        assert_eq!(config.emitter.interval_ms, 5000);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.shutdown.drain_secs, 5);
    }

    #[test]
    fn file_backend_parses() {
        let config: AppConfig = toml::from_str(
            r#"
            [storage]
            backend = "file"
            path = "/var/log/ticklog.txt"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.path.as_deref(), Some("/var/log/ticklog.txt"));
    }
}
