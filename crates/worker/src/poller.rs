//! Polling loop driving the trade processor.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info};

use crate::processor::TradeProcessor;

/// Timed worker that drains the trade queue on a fixed interval.
///
/// The stop signal is checked between ticks only; a tick in progress
/// finishes its batch before the loop exits.
pub struct PollWorker {
    processor: TradeProcessor,
    interval: Duration,
}

impl PollWorker {
    /// Creates a new polling worker.
    #[must_use]
    pub fn new(processor: TradeProcessor, interval: Duration) -> Self {
        Self {
            processor,
            interval,
        }
    }

    /// Runs the poll loop until the shutdown signal flips to `true` or
    /// the sender side is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!("worker started, polling every {:?}", self.interval);

        let mut timer = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    match self.processor.drain().await {
                        // 0 is a valid quiet tick, not worth a log line
                        Ok(0) => {}
                        Ok(n) => info!("processed {n} trades"),
                        Err(e) => error!("poll tick failed: {e:#}"),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("worker stopping");
                        break;
                    }
                }
            }
        }
    }
}
