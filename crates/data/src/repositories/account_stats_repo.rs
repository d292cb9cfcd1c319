//! Account statistics repository.
//!
//! Maintains the per-account running aggregates through an atomic
//! insert-or-increment upsert.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::AccountStats;

/// Repository for account aggregate operations.
#[derive(Debug, Clone)]
pub struct AccountStatsRepository {
    pool: SqlitePool,
}

impl AccountStatsRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Applies one trade's signed profit to an account aggregate.
    ///
    /// Creates the row with `trade_count = 1` on first use, otherwise
    /// increments count and profit in place. The upsert is a single
    /// statement, so concurrent callers for the same account cannot lose
    /// an update.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn apply_profit(&self, account: &str, profit: f64) -> Result<()> {
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
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets the aggregate for an account.
    ///
    /// Accounts that have never been aggregated return the zero record,
    /// not an error.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn get(&self, account: &str) -> Result<AccountStats> {
        let record = sqlx::query_as::<_, AccountStats>(
            r"
            SELECT account, trade_count, cumulative_profit
            FROM account_stats
            WHERE account = ?1
            ",
        )
        .bind(account)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.unwrap_or_else(|| AccountStats::zero(account.to_string())))
    }
}
