//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{AppConfig, StorageBackend};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading. Any of these is fatal at
/// startup; the process never serves with a bad config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment override: {0}")]
    Env(String),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: defaults, then an optional TOML file, then
/// environment overrides, then validation.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = fs::read_to_string(p)?;
            toml::from_str(&content)?
        }
        None => AppConfig::default(),
    };

    apply_env_overrides(
        &mut config,
        std::env::var("TICKLOG_PORT").ok().as_deref(),
        std::env::var("TICKLOG_LOG_FILE").ok().as_deref(),
    )?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides onto a parsed config.
///
/// `TICKLOG_PORT` rewrites the port of the bind address;
/// `TICKLOG_LOG_FILE` switches storage to the file backend at that path.
fn apply_env_overrides(
    config: &mut AppConfig,
    port: Option<&str>,
    log_file: Option<&str>,
) -> Result<(), ConfigError> {
    if let Some(port) = port {
        let port: u16 = port
            .parse()
            .map_err(|_| ConfigError::Env(format!("TICKLOG_PORT `{port}` is not a port")))?;
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.listener.bind_address = format!("{host}:{port}");
    }

    if let Some(path) = log_file {
        config.storage.backend = StorageBackend::File;
        config.storage.path = Some(path.to_string());
    }

    Ok(())
}
