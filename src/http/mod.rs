//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, middleware)
//!     → handlers.rs (read-only snapshots from the log store)
//!     → JSON envelope response
//! ```

pub mod handlers;
pub mod server;

pub use handlers::AppState;
pub use server::build_router;
