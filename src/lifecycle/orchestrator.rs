//! Worker and listener orchestration.
//!
//! The orchestrator owns the application-level shutdown signal, the set
//! of background worker tasks, and the HTTP serve task. Shutdown is a
//! two-phase ordered sequence: cancel and join the workers first (so the
//! history stops changing), then drain the listener. Both phases are
//! bounded by deadlines; overruns are collected into a report instead of
//! blocking process exit.

use std::future::Future;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::lifecycle::{signals, Shutdown};

/// A single shutdown failure. None of these prevent process exit.
#[derive(Debug, thiserror::Error)]
pub enum ShutdownError {
    #[error("worker `{name}` did not stop within {timeout:?}")]
    WorkerTimeout { name: String, timeout: Duration },

    #[error("worker `{name}` failed: {source}")]
    WorkerFailed {
        name: String,
        source: tokio::task::JoinError,
    },

    #[error("listener did not drain within {0:?}")]
    DrainTimeout(Duration),

    #[error("listener error: {0}")]
    Serve(std::io::Error),
}

/// All errors collected during a shutdown sequence, reported once.
#[derive(Debug)]
pub struct ShutdownReport {
    pub errors: Vec<ShutdownError>,
}

impl std::fmt::Display for ShutdownReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "shutdown completed with {} error(s): ", self.errors.len())?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ShutdownReport {}

struct WorkerHandle {
    name: String,
    handle: JoinHandle<()>,
}

/// Wires workers and the HTTP listener together and tears them down in
/// order on the first termination signal.
pub struct Orchestrator {
    shutdown: Shutdown,
    workers: Vec<WorkerHandle>,
    worker_wait: Duration,
    drain: Duration,
}

impl Orchestrator {
    /// `worker_wait` bounds how long stopped workers may take to join;
    /// `drain` bounds how long in-flight HTTP requests may take to
    /// finish.
    pub fn new(worker_wait: Duration, drain: Duration) -> Self {
        Self {
            shutdown: Shutdown::new(),
            workers: Vec::new(),
            worker_wait,
            drain,
        }
    }

    /// Handle to the application-level shutdown signal. Triggering it
    /// starts the same sequence a termination signal would.
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Launch a worker as an independent task carrying its own shutdown
    /// receiver. Returns immediately; the worker runs until it observes
    /// the signal.
    pub fn spawn_worker<F, Fut>(&mut self, name: &str, f: F)
    where
        F: FnOnce(broadcast::Receiver<()>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(worker = name, "Starting worker");
        let handle = tokio::spawn(f(self.shutdown.subscribe()));
        self.workers.push(WorkerHandle {
            name: name.to_string(),
            handle,
        });
    }

    /// Serve HTTP on `listener` until shutdown, then run the ordered
    /// teardown. An empty report is `Ok(())`; a non-empty one is
    /// returned to the caller but the process should exit either way.
    pub async fn run(mut self, listener: TcpListener, app: Router) -> Result<(), ShutdownReport> {
        tokio::spawn(signals::watch(self.shutdown.clone()));

        // The serve task drains only when the orchestrator says the
        // listener phase may begin; workers stop first.
        let (drain_tx, drain_rx) = oneshot::channel::<()>();
        let mut serve_task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = drain_rx.await;
                })
                .await
        });

        let mut triggered = self.shutdown.subscribe();
        let mut errors = Vec::new();
        let mut serve_finished = false;

        tokio::select! {
            _ = triggered.recv() => {}
            res = &mut serve_task => {
                // Listener died before any shutdown was requested.
                serve_finished = true;
                if let Some(err) = serve_result_error(res) {
                    errors.push(err);
                }
            }
        }

        tracing::info!("Stopping application services...");
        errors.extend(self.stop_workers().await);

        if !serve_finished {
            tracing::info!("Stopping HTTP listener...");
            let _ = drain_tx.send(());
            match time::timeout(self.drain, &mut serve_task).await {
                Ok(res) => {
                    if let Some(err) = serve_result_error(res) {
                        errors.push(err);
                    }
                }
                Err(_) => {
                    serve_task.abort();
                    errors.push(ShutdownError::DrainTimeout(self.drain));
                }
            }
        }

        if errors.is_empty() {
            tracing::info!("Graceful shutdown complete");
            Ok(())
        } else {
            Err(ShutdownReport { errors })
        }
    }

    /// Phase 1: broadcast the stop signal and join every worker,
    /// bounded by a single deadline across all of them. A worker that
    /// overruns is abandoned (aborted) and reported, never waited on
    /// indefinitely.
    async fn stop_workers(&mut self) -> Vec<ShutdownError> {
        self.shutdown.trigger();

        let deadline = Instant::now() + self.worker_wait;
        let mut errors = Vec::new();

        for worker in self.workers.drain(..) {
            let WorkerHandle { name, mut handle } = worker;
            match time::timeout_at(deadline, &mut handle).await {
                Ok(Ok(())) => {
                    tracing::debug!(worker = %name, "Worker stopped");
                }
                Ok(Err(source)) => {
                    errors.push(ShutdownError::WorkerFailed { name, source });
                }
                Err(_) => {
                    tracing::warn!(
                        worker = %name,
                        outstanding_subscribers = self.shutdown.receiver_count(),
                        "Worker did not stop within the deadline"
                    );
                    handle.abort();
                    errors.push(ShutdownError::WorkerTimeout {
                        name,
                        timeout: self.worker_wait,
                    });
                }
            }
        }

        errors
    }
}

fn serve_result_error(
    res: Result<Result<(), std::io::Error>, tokio::task::JoinError>,
) -> Option<ShutdownError> {
    match res {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(ShutdownError::Serve(e)),
        Err(e) => Some(ShutdownError::Serve(std::io::Error::other(e))),
    }
}
