//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared with subsystems at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so the service runs with no config file
//! - Environment overrides exist for the two knobs deployments set most
//!   (port, log file path); everything else comes from the file
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports all violations at once

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AppConfig, EmitterConfig, ListenerConfig, ShutdownConfig, StorageBackend, StorageConfig,
};
pub use validation::{validate_config, ValidationError};
