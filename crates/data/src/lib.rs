//! Storage layer for the trade ingestion pipeline.
//!
//! This crate provides:
//! - `SQLite` database handle with embedded migrations
//! - Data models for queued trades and account aggregates
//! - Repositories for typed access to the queue and stats tables

pub mod database;
pub mod models;
pub mod repositories;

// Re-export commonly used types
pub use database::Database;
pub use models::{AccountStats, NewTrade, TradeRecord, TradeSide};
pub use repositories::{AccountStatsRepository, Repositories, TradeQueueRepository};
