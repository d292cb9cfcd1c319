//! HTTP transport for the trade pipeline.
//!
//! Producers submit trades over `POST /api/trades`; aggregates are read
//! back over `GET /api/stats/:account`. Acceptance means durably queued,
//! not yet aggregated — stats are eventually consistent.

pub mod handlers;
pub mod server;
pub mod validation;

pub use server::{ApiServer, ApiState};
