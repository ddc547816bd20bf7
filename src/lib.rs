//! Periodic log emitter service library.

pub mod config;
pub mod emitter;
pub mod http;
pub mod lifecycle;
pub mod store;

pub use config::AppConfig;
pub use emitter::PeriodicEmitter;
pub use lifecycle::{Orchestrator, Shutdown};
pub use store::{LogEntry, LogStorage};
