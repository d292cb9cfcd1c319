//! Data models for the trade queue and account aggregates.

pub mod account_stats;
pub mod trade;

pub use account_stats::AccountStats;
pub use trade::{NewTrade, TradeRecord, TradeSide};
