//! Per-trade unit of work.
//!
//! Computes a pending trade's profit and settles it: the stats increment
//! and the processed-flag update commit together in one transaction, so a
//! trade is aggregated exactly once or left fully pending.

use anyhow::{Context, Result};
use tracing::error;

use trade_ledger_data::{TradeQueueRepository, TradeRecord};

use crate::profit::trade_profit;

/// Processes pending trades from the queue into account aggregates.
#[derive(Debug, Clone)]
pub struct TradeProcessor {
    queue: TradeQueueRepository,
}

impl TradeProcessor {
    /// Creates a new processor over the given queue.
    #[must_use]
    pub fn new(queue: TradeQueueRepository) -> Self {
        Self { queue }
    }

    /// Aggregates a single trade.
    ///
    /// # Errors
    /// Returns an error if settlement fails; the row stays pending and is
    /// retried on the next poll.
    pub async fn process(&self, trade: &TradeRecord) -> Result<()> {
        let profit = trade_profit(trade);

        self.queue
            .settle(trade.id, &trade.account, profit)
            .await
            .with_context(|| format!("settling trade {}", trade.id))?;

        Ok(())
    }

    /// Drains all currently-pending trades.
    ///
    /// A failing trade is logged and skipped; it does not abort the batch.
    /// Returns the number of trades settled this pass.
    ///
    /// # Errors
    /// Returns an error only if the pending scan itself fails.
    pub async fn drain(&self) -> Result<usize> {
        let trades = self
            .queue
            .fetch_pending()
            .await
            .context("fetching pending trades")?;

        let mut processed = 0;
        for trade in &trades {
            match self.process(trade).await {
                Ok(()) => processed += 1,
                Err(e) => error!("failed to process trade {}: {e:#}", trade.id),
            }
        }

        Ok(processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trade_ledger_data::{Database, NewTrade, Repositories, TradeSide};

    #[tokio::test]
    async fn test_drain_empty_queue_is_silent_success() {
        let db = Database::new_in_memory().await.unwrap();
        let repos = Repositories::new(db.pool());
        let processor = TradeProcessor::new(repos.queue);

        assert_eq!(processor.drain().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_process_settles_exactly_once() {
        let db = Database::new_in_memory().await.unwrap();
        let repos = Repositories::new(db.pool());
        let processor = TradeProcessor::new(repos.queue.clone());

        let trade = NewTrade::new(
            "acc1".to_string(),
            "ABCDEF".to_string(),
            1.0,
            1.0,
            2.0,
            TradeSide::Buy,
        );
        repos.queue.enqueue(&trade).await.unwrap();

        assert_eq!(processor.drain().await.unwrap(), 1);
        // Second pass sees nothing; the aggregate is untouched
        assert_eq!(processor.drain().await.unwrap(), 0);

        let stats = repos.stats.get("acc1").await.unwrap();
        assert_eq!(stats.trade_count, 1);
        assert!((stats.cumulative_profit - 100_000.0).abs() < 1e-9);
    }
}
