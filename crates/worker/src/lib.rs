//! Background aggregation pipeline.
//!
//! Drains the durable trade queue on a fixed poll interval, folding each
//! pending trade's profit into its account aggregate exactly once.

pub mod poller;
pub mod processor;
pub mod profit;

pub use poller::PollWorker;
pub use processor::TradeProcessor;
pub use profit::{profit, trade_profit, CONTRACT_SIZE};
