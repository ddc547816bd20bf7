//! The periodic emitter worker.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use tokio::sync::broadcast;
use tokio::time::{self, Instant};

use crate::emitter::ValueGenerator;
use crate::store::LogStorage;

/// Background worker that emits (timestamp, value) pairs on a fixed
/// interval: one write through the log store plus one echo line on
/// stdout (the echo is the service's observable output and happens
/// whether or not the store write succeeds).
pub struct PeriodicEmitter {
    interval: Duration,
    storage: Arc<dyn LogStorage>,
    generator: Arc<dyn ValueGenerator>,
    /// Held for the whole run once generated. The lock allows variants
    /// that rotate the value concurrently; it is independent of the
    /// store's lock and the two are never nested.
    current_value: RwLock<String>,
}

impl PeriodicEmitter {
    pub fn new(
        interval: Duration,
        storage: Arc<dyn LogStorage>,
        generator: Arc<dyn ValueGenerator>,
    ) -> Self {
        Self {
            interval,
            storage,
            generator,
            current_value: RwLock::new(String::new()),
        }
    }

    /// Run until the shutdown signal arrives.
    ///
    /// The value is generated once at start and reused for every tick.
    /// An immediate emission happens before the wait loop so observers
    /// see output right away instead of after a full interval.
    /// Cancellation is observed at the select point, so worst-case stop
    /// latency is one interval. Returning on shutdown is the normal
    /// termination path, not a failure.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        {
            let mut value = self.current_value.write().expect("emitter value lock poisoned");
            *value = self.generator.generate();
        }

        tracing::info!(interval = ?self.interval, "Periodic emitter starting");

        self.emit_current();

        // First tick lands one full interval from now; the immediate
        // emission above already covered t=0.
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.emit_current();
                }
                _ = shutdown.recv() => {
                    tracing::info!("Periodic emitter received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    fn emit_current(&self) {
        let value = {
            let value = self.current_value.read().expect("emitter value lock poisoned");
            value.clone()
        };

        let timestamp = Utc::now();

        if let Err(e) = self.storage.store(timestamp, &value) {
            tracing::error!(error = %e, "Failed to store log entry");
        }

        println!(
            "{}: {}",
            timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            value
        );
    }
}
