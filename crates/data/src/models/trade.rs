//! Queued trade data model.
//!
//! A trade sits in the queue with `processed = false` until the worker
//! folds its profit into the account aggregate exactly once.

use serde::{Deserialize, Serialize};

/// A trade row fetched from the queue.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TradeRecord {
    /// Auto-generated queue ID, monotonically increasing
    pub id: i64,
    /// Opaque account identifier
    pub account: String,
    /// Currency-pair code (six uppercase letters, validated at the edge)
    pub symbol: String,
    /// Traded volume in lots
    pub volume: f64,
    /// Position open price
    pub open_price: f64,
    /// Position close price
    pub close_price: f64,
    /// Trade direction: "buy" or "sell"
    pub side: String,
    /// Whether the worker has aggregated this row
    pub processed: bool,
}

impl TradeRecord {
    /// Returns true if this trade was a buy.
    #[must_use]
    pub fn is_buy(&self) -> bool {
        self.side == "buy"
    }

    /// Returns true if this trade was a sell.
    #[must_use]
    pub fn is_sell(&self) -> bool {
        self.side == "sell"
    }

    /// Returns the parsed trade side.
    #[must_use]
    pub fn parsed_side(&self) -> Option<TradeSide> {
        match self.side.as_str() {
            "buy" => Some(TradeSide::Buy),
            "sell" => Some(TradeSide::Sell),
            _ => None,
        }
    }
}

/// A trade accepted for ingestion, not yet assigned an ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTrade {
    pub account: String,
    pub symbol: String,
    pub volume: f64,
    pub open_price: f64,
    pub close_price: f64,
    pub side: String,
}

impl NewTrade {
    /// Creates a new trade payload (pre-enqueue).
    #[must_use]
    pub fn new(
        account: String,
        symbol: String,
        volume: f64,
        open_price: f64,
        close_price: f64,
        side: TradeSide,
    ) -> Self {
        Self {
            account,
            symbol,
            volume,
            open_price,
            close_price,
            side: side.as_str().to_string(),
        }
    }
}

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }

    /// Parses a side from its wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "buy" => Some(TradeSide::Buy),
            "sell" => Some(TradeSide::Sell),
            _ => None,
        }
    }
}
