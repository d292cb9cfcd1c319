use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use trade_ledger_data::NewTrade;

use crate::server::ApiState;
use crate::validation;

/// Trade submission payload.
///
/// `open`/`close` are the wire names; the store columns are
/// `open_price`/`close_price`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitTradeRequest {
    pub account: String,
    pub symbol: String,
    pub volume: f64,
    pub open: f64,
    pub close: f64,
    pub side: String,
}

#[derive(Serialize)]
pub struct TradeAcceptedResponse {
    /// Queue ID assigned to the accepted trade.
    pub id: i64,
}

#[derive(Serialize)]
pub struct AccountStatsResponse {
    pub account: String,
    pub trades: i64,
    pub profit: f64,
}

/// Accepts a trade into the durable queue.
///
/// `202 Accepted` means the trade is queued, not yet aggregated; stats
/// catch up on the worker's next poll.
///
/// # Errors
/// Returns `StatusCode::BAD_REQUEST` for an invalid payload, or
/// `StatusCode::INTERNAL_SERVER_ERROR` if the enqueue fails.
pub async fn submit_trade(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<SubmitTradeRequest>,
) -> Result<(StatusCode, Json<TradeAcceptedResponse>), StatusCode> {
    let side = validation::validate_trade(&req).map_err(|e| {
        tracing::debug!("rejected trade submission: {e}");
        StatusCode::BAD_REQUEST
    })?;

    let trade = NewTrade::new(req.account, req.symbol, req.volume, req.open, req.close, side);

    let id = state
        .queue
        .enqueue(&trade)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok((StatusCode::ACCEPTED, Json(TradeAcceptedResponse { id })))
}

/// Reads the aggregate for one account.
///
/// Accounts with no processed trades return the zero record. Profit is
/// rounded to two decimal places here, not in the store.
///
/// # Errors
/// Returns `StatusCode::INTERNAL_SERVER_ERROR` if the read fails.
pub async fn account_stats(
    State(state): State<Arc<ApiState>>,
    Path(account): Path<String>,
) -> Result<Json<AccountStatsResponse>, StatusCode> {
    let stats = state
        .stats
        .get(&account)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(AccountStatsResponse {
        account: stats.account,
        trades: stats.trade_count,
        profit: round2(stats.cumulative_profit),
    }))
}

/// Liveness probe: one storage round trip.
///
/// # Errors
/// Returns `StatusCode::SERVICE_UNAVAILABLE` if the database is unreachable.
pub async fn healthz(State(state): State<Arc<ApiState>>) -> Result<&'static str, StatusCode> {
    state
        .db
        .ping()
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    Ok("OK")
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
