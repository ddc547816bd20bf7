//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for SIGTERM and SIGINT (async-safe via Tokio)
//! - Translate the first signal into a graceful shutdown trigger
//! - Force process exit on a repeated signal
//!
//! # Design Decisions
//! - First SIGTERM/SIGINT starts graceful shutdown exactly once
//! - A second signal before shutdown completes forces immediate exit;
//!   an operator must always be able to kill a wedged process

use crate::lifecycle::Shutdown;

/// Resolve when SIGINT or SIGTERM is delivered.
#[cfg(unix)]
async fn termination_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to install SIGTERM handler");
            std::future::pending::<()>().await;
            unreachable!()
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}

#[cfg(not(unix))]
async fn termination_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

/// Watch for termination signals and drive the shutdown coordinator.
///
/// Runs for the rest of the process lifetime: the first signal triggers
/// graceful shutdown, the second forces exit.
pub async fn watch(shutdown: Shutdown) {
    termination_signal().await;
    tracing::info!("Termination signal received, shutting down gracefully (repeat to force)");
    shutdown.trigger();

    termination_signal().await;
    tracing::warn!("Second termination signal received, forcing exit");
    std::process::exit(1);
}
