use crate::handlers;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use trade_ledger_data::{AccountStatsRepository, Database, TradeQueueRepository};

/// Shared handler state: the database handle plus its repositories.
pub struct ApiState {
    pub db: Database,
    pub queue: TradeQueueRepository,
    pub stats: AccountStatsRepository,
}

impl ApiState {
    #[must_use]
    pub fn new(db: Database) -> Self {
        let pool = db.pool();
        Self {
            queue: TradeQueueRepository::new(pool.clone()),
            stats: AccountStatsRepository::new(pool),
            db,
        }
    }
}

pub struct ApiServer {
    state: Arc<ApiState>,
}

impl ApiServer {
    #[must_use]
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/api/trades", post(handlers::submit_trade))
            .route("/api/stats/:account", get(handlers::account_stats))
            .route("/healthz", get(handlers::healthz))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Starts the web server listening on the specified address.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the address or serve requests.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Web API listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}
