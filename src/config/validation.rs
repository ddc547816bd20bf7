//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals and timeouts > 0, address parses)
//! - Check backend selection is complete (file backend needs a path)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system; failures are fatal

use std::net::SocketAddr;

use crate::config::schema::{AppConfig, StorageBackend};

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("listener.request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("emitter.interval_ms must be greater than zero")]
    ZeroInterval,

    #[error("storage.path is required when storage.backend is \"file\"")]
    MissingStoragePath,

    #[error("shutdown.{0} must be greater than zero")]
    ZeroShutdownDeadline(&'static str),
}

/// Validate a parsed config, collecting every violation.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.emitter.interval_ms == 0 {
        errors.push(ValidationError::ZeroInterval);
    }
    if config.storage.backend == StorageBackend::File
        && config.storage.path.as_deref().map_or(true, str::is_empty)
    {
        errors.push(ValidationError::MissingStoragePath);
    }
    if config.shutdown.worker_wait_secs == 0 {
        errors.push(ValidationError::ZeroShutdownDeadline("worker_wait_secs"));
    }
    if config.shutdown.drain_secs == 0 {
        errors.push(ValidationError::ZeroShutdownDeadline("drain_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
