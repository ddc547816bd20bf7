//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Construct store/emitter → Spawn workers → Serve
//!
//! Shutdown (orchestrator.rs):
//!     Signal received → Cancel workers → Bounded wait → Drain listener → Report
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//!     Second signal → Forced exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then workers, listener last
//! - Ordered shutdown: background work stops before the listener drains
//! - Every shutdown wait is bounded; a deadline overrun becomes a
//!   reported error, never an indefinite hang

pub mod orchestrator;
pub mod shutdown;
pub mod signals;

pub use orchestrator::{Orchestrator, ShutdownError, ShutdownReport};
pub use shutdown::Shutdown;
