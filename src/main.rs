//! ticklog: periodic log emitter service
//!
//! A small service built with Tokio and Axum: a background worker
//! emits a (timestamp, value) pair on a fixed interval into a pluggable
//! history store, and an HTTP API serves snapshots of that history.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                   TICKLOG                    │
//!                    │                                              │
//!                    │  ┌──────────┐  store()   ┌───────────────┐   │
//!                    │  │ periodic │───────────▶│  log storage  │   │
//!                    │  │ emitter  │            │ memory | file │   │
//!                    │  └────┬─────┘            └───────┬───────┘   │
//!                    │       │ echo                     │ get_all   │
//!                    │       ▼                          │ get_latest│
//!                    │    stdout                        ▼           │
//!   HTTP client ─────┼──────────────────────▶ ┌───────────────┐     │
//!                    │   /logs /status        │  axum router  │     │
//!                    │                        └───────────────┘     │
//!                    │                                              │
//!                    │  ┌────────────────────────────────────────┐  │
//!                    │  │             lifecycle                  │  │
//!                    │  │  signals → cancel workers → drain HTTP │  │
//!                    │  └────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticklog::config::{self, StorageBackend};
use ticklog::emitter::{PeriodicEmitter, UuidGenerator};
use ticklog::http;
use ticklog::lifecycle::Orchestrator;
use ticklog::store::{FileStore, LogStorage, MemoryStore};

#[derive(Parser)]
#[command(name = "ticklog", about = "Periodic log emitter service")]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticklog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("ticklog v0.1.0 starting");

    let cli = Cli::parse();

    // Load configuration; any config error is fatal before serving.
    let config = config::load_config(cli.config.as_deref())?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        interval_ms = config.emitter.interval_ms,
        backend = ?config.storage.backend,
        "Configuration loaded"
    );

    // Select the storage backend once, at construction.
    let store: Arc<dyn LogStorage> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => {
            // Validation guarantees the path is present for this backend.
            let path = config.storage.path.clone().unwrap_or_default();
            Arc::new(FileStore::new(path))
        }
    };

    // Bind before starting workers so a bad address fails fast.
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "Listening for connections");

    let mut orchestrator = Orchestrator::new(
        Duration::from_secs(config.shutdown.worker_wait_secs),
        Duration::from_secs(config.shutdown.drain_secs),
    );

    let emitter = PeriodicEmitter::new(
        Duration::from_millis(config.emitter.interval_ms),
        store.clone(),
        Arc::new(UuidGenerator),
    );
    orchestrator.spawn_worker("emitter", |shutdown| emitter.run(shutdown));

    let app = http::build_router(&config.listener, store);

    if let Err(report) = orchestrator.run(listener, app).await {
        tracing::error!(error = %report, "Shutdown finished with errors");
        return Err(report.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
