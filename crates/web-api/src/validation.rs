//! Request validation for the ingestion endpoint.
//!
//! Everything here runs before the storage layer is touched; the queue
//! never sees an invalid shape.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use trade_ledger_data::TradeSide;

use crate::handlers::SubmitTradeRequest;

/// Rejection reasons for a submitted trade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("account must not be empty")]
    EmptyAccount,

    #[error("symbol must be six uppercase letters")]
    InvalidSymbol,

    #[error("volume, open, and close must be positive")]
    NonPositiveNumber,

    #[error("side must be \"buy\" or \"sell\"")]
    InvalidSide,
}

fn symbol_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^[A-Z]{6}$").expect("valid symbol pattern"))
}

/// Validates a submitted trade, returning its parsed side.
///
/// # Errors
/// Returns the first failing rule. Non-finite numbers fail the
/// positivity check.
pub fn validate_trade(req: &SubmitTradeRequest) -> Result<TradeSide, ValidationError> {
    if req.account.is_empty() {
        return Err(ValidationError::EmptyAccount);
    }

    if !symbol_re().is_match(&req.symbol) {
        return Err(ValidationError::InvalidSymbol);
    }

    if !(req.volume > 0.0 && req.open > 0.0 && req.close > 0.0)
        || !(req.volume.is_finite() && req.open.is_finite() && req.close.is_finite())
    {
        return Err(ValidationError::NonPositiveNumber);
    }

    TradeSide::parse(&req.side).ok_or(ValidationError::InvalidSide)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SubmitTradeRequest {
        SubmitTradeRequest {
            account: "acc1".to_string(),
            symbol: "EURUSD".to_string(),
            volume: 1.0,
            open: 1.0850,
            close: 1.0920,
            side: "buy".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert_eq!(validate_trade(&valid_request()), Ok(TradeSide::Buy));
    }

    #[test]
    fn test_empty_account_rejected() {
        let mut req = valid_request();
        req.account = String::new();
        assert_eq!(validate_trade(&req), Err(ValidationError::EmptyAccount));
    }

    #[test]
    fn test_symbol_format_enforced() {
        for symbol in ["eurusd", "EURUS", "EURUSD1", "EUR-SD", ""] {
            let mut req = valid_request();
            req.symbol = symbol.to_string();
            assert_eq!(
                validate_trade(&req),
                Err(ValidationError::InvalidSymbol),
                "symbol {symbol:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_positive_numbers_rejected() {
        for (volume, open, close) in [(0.0, 1.0, 1.0), (1.0, -1.0, 1.0), (1.0, 1.0, 0.0)] {
            let mut req = valid_request();
            req.volume = volume;
            req.open = open;
            req.close = close;
            assert_eq!(
                validate_trade(&req),
                Err(ValidationError::NonPositiveNumber)
            );
        }
    }

    #[test]
    fn test_nan_rejected() {
        let mut req = valid_request();
        req.close = f64::NAN;
        assert_eq!(
            validate_trade(&req),
            Err(ValidationError::NonPositiveNumber)
        );
    }

    #[test]
    fn test_side_must_be_buy_or_sell() {
        let mut req = valid_request();
        req.side = "hold".to_string();
        assert_eq!(validate_trade(&req), Err(ValidationError::InvalidSide));

        req.side = "sell".to_string();
        assert_eq!(validate_trade(&req), Ok(TradeSide::Sell));
    }
}
