//! Trade queue repository.
//!
//! Provides append, pending-scan, and settlement operations over the
//! durable trade queue.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::{NewTrade, TradeRecord};

/// Repository for trade queue operations.
#[derive(Debug, Clone)]
pub struct TradeQueueRepository {
    pool: SqlitePool,
}

impl TradeQueueRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Appends a new trade to the queue and returns the generated ID.
    ///
    /// The row starts unprocessed. Field validation is the caller's job;
    /// this fails only on storage faults.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn enqueue(&self, trade: &NewTrade) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r"
            INSERT INTO trades_q (account, symbol, volume, open_price, close_price, side)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id
            ",
        )
        .bind(&trade.account)
        .bind(&trade.symbol)
        .bind(trade.volume)
        .bind(trade.open_price)
        .bind(trade.close_price)
        .bind(&trade.side)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// Fetches all unprocessed trades in insertion order.
    ///
    /// Each call returns a consistent snapshot; rows enqueued after the
    /// scan started show up on the next call.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn fetch_pending(&self) -> Result<Vec<TradeRecord>> {
        let records = sqlx::query_as::<_, TradeRecord>(
            r"
            SELECT id, account, symbol, volume, open_price, close_price, side, processed
            FROM trades_q
            WHERE processed = 0
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Marks a trade as processed.
    ///
    /// Re-invoking on an already-processed ID is a no-op success.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn mark_processed(&self, id: i64) -> Result<()> {
        sqlx::query(
            r"
            UPDATE trades_q
            SET processed = 1
            WHERE id = ?1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Folds a trade's profit into its account aggregate and marks the
    /// row processed, in a single transaction.
    ///
    /// Either both writes take effect or neither does, so a crash between
    /// them cannot double-count the trade on the next poll.
    ///
    /// # Errors
    /// Returns an error if the transaction fails; the row stays pending.
    pub async fn settle(&self, id: i64, account: &str, profit: f64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO account_stats (account, trade_count, cumulative_profit)
            VALUES (?1, 1, ?2)
            ON CONFLICT(account) DO UPDATE SET
                trade_count = trade_count + 1,
                cumulative_profit = cumulative_profit + excluded.cumulative_profit
            ",
        )
        .bind(account)
        .bind(profit)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
            UPDATE trades_q
            SET processed = 1
            WHERE id = ?1
            ",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Returns the number of unprocessed trades.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn count_pending(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r"
            SELECT COUNT(*)
            FROM trades_q
            WHERE processed = 0
            ",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }
}
