//! Periodic emission subsystem.
//!
//! # Data Flow
//! ```text
//! ValueGenerator ──generate() once at start──▶ PeriodicEmitter
//!     PeriodicEmitter ──every tick──▶ LogStorage + stdout echo
//!     Shutdown broadcast ──recv──▶ loop exit (cooperative)
//! ```
//!
//! # Design Decisions
//! - The emitted value is generated once per run, not per tick; several
//!   deployments depend on a stable value for the process lifetime
//! - Store failures are logged and the loop continues (best-effort
//!   telemetry must not take the worker down)
//! - Cancellation is observed at the select point; stop latency is
//!   bounded by one tick interval

pub mod generator;
pub mod periodic;

pub use generator::{FixedGenerator, UuidGenerator, ValueGenerator};
pub use periodic::PeriodicEmitter;
