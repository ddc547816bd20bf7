//! HTTP router setup.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Inject shared state (the log store)
//! - Wire up middleware (tracing, request timeout)
//!
//! The serve loop itself lives in the lifecycle orchestrator, which
//! owns shutdown ordering; this module only builds the router.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ListenerConfig;
use crate::http::handlers::{self, AppState};
use crate::store::LogStorage;

/// Build the application router over the given log store.
pub fn build_router(config: &ListenerConfig, store: Arc<dyn LogStorage>) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/logs", get(handlers::get_all_logs))
        .route("/status", get(handlers::get_status))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
}
