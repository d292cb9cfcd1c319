//! Database repositories for the trade pipeline.
//!
//! Each repository provides typed access to one table; the queue
//! repository additionally owns the cross-table settlement transaction.

pub mod account_stats_repo;
pub mod trade_queue_repo;

pub use account_stats_repo::AccountStatsRepository;
pub use trade_queue_repo::TradeQueueRepository;

use sqlx::SqlitePool;

/// Creates all repositories from a single database pool.
pub struct Repositories {
    pub queue: TradeQueueRepository,
    pub stats: AccountStatsRepository,
}

impl Repositories {
    /// Creates a new set of repositories from a database pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            queue: TradeQueueRepository::new(pool.clone()),
            stats: AccountStatsRepository::new(pool),
        }
    }
}
