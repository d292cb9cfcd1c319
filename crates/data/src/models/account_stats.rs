//! Per-account aggregate data model.

use serde::{Deserialize, Serialize};

/// Running aggregate for one account.
///
/// `trade_count` equals the number of processed queue rows for the
/// account and `cumulative_profit` the sum of their signed profits.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AccountStats {
    pub account: String,
    pub trade_count: i64,
    pub cumulative_profit: f64,
}

impl AccountStats {
    /// Returns the zero aggregate for an account with no processed trades.
    #[must_use]
    pub fn zero(account: String) -> Self {
        Self {
            account,
            trade_count: 0,
            cumulative_profit: 0.0,
        }
    }
}
