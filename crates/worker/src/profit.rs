//! Profit calculation for closed trades.

use trade_ledger_data::{TradeRecord, TradeSide};

/// Fixed multiplier converting a per-unit price delta into a monetary
/// amount (one standard lot).
pub const CONTRACT_SIZE: f64 = 100_000.0;

/// Returns the signed profit of a closed trade.
///
/// `(close - open) * volume * CONTRACT_SIZE`, negated for sells. Inputs
/// are pre-validated at the ingestion edge; this is pure and total.
#[must_use]
pub fn profit(close: f64, open: f64, volume: f64, side: TradeSide) -> f64 {
    let raw = (close - open) * volume * CONTRACT_SIZE;
    match side {
        TradeSide::Buy => raw,
        TradeSide::Sell => -raw,
    }
}

/// Returns the signed profit of a queued trade row.
#[must_use]
pub fn trade_profit(trade: &TradeRecord) -> f64 {
    let raw = (trade.close_price - trade.open_price) * trade.volume * CONTRACT_SIZE;
    if trade.is_sell() {
        -raw
    } else {
        raw
    }
}
