//! Request handlers for the log history API.
//!
//! Every response body is a flat JSON envelope; failures use
//! `{"error": "<message>"}`. A malformed query parameter is isolated to
//! its request (400), never a process-level failure.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::store::LogStorage;

/// State injected into handlers. Explicitly owned and passed in; no
/// global mutable state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LogStorage>,
}

/// Default window for `/status` when `n` is absent.
const DEFAULT_LATEST: i64 = 10;

/// GET /logs: the full history.
pub async fn get_all_logs(State(state): State<AppState>) -> Response {
    let logs = state.store.get_all();
    Json(json!({ "logs": logs })).into_response()
}

/// GET /status?n=K: readiness plus the last K entries (default 10).
pub async fn get_status(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let n = match params.get("n") {
        None => DEFAULT_LATEST,
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(raw = %raw, error = %e, "Rejecting invalid 'n' query parameter");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": format!("invalid query parameter 'n': {e}") })),
                )
                    .into_response();
            }
        },
    };

    // Negative n behaves like zero: an empty window.
    let logs = state.store.get_latest(n.max(0) as usize);

    Json(json!({ "status": "ready", "logs": logs })).into_response()
}

/// GET /healthz: liveness probe.
pub async fn healthz() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}
