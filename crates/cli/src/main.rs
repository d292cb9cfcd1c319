use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use trade_ledger_core::{AppConfig, ConfigLoader};
use trade_ledger_data::{Database, Repositories};
use trade_ledger_web_api::{ApiServer, ApiState};
use trade_ledger_worker::{PollWorker, TradeProcessor};

#[derive(Parser)]
#[command(name = "trade-ledger")]
#[command(about = "Trade ingestion and account statistics service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the ingestion API and the aggregation worker in one process
    Run {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
    },
    /// Start the ingestion API server only
    Serve {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
    },
    /// Start the aggregation worker only
    Work {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Run { config } => run_pipeline(&config).await?,
        Commands::Serve { config } => run_server(&config).await?,
        Commands::Work { config } => run_worker(&config).await?,
    }

    Ok(())
}

/// Runs the API server and the polling worker side by side.
async fn run_pipeline(config_path: &str) -> anyhow::Result<()> {
    let config = ConfigLoader::load_from(config_path)?;
    let db = connect(&config).await?;

    let (stop_tx, handle) = spawn_worker(&config, &db);

    let state = Arc::new(ApiState::new(db));
    let addr = config.server.addr();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = ApiServer::new(state).serve(&addr).await {
            tracing::error!("API server failed: {e:#}");
        }
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");

    // Let an in-flight tick finish before the process exits
    let _ = stop_tx.send(true);
    handle.await?;
    server_handle.abort();

    Ok(())
}

/// Runs the ingestion API in the foreground.
async fn run_server(config_path: &str) -> anyhow::Result<()> {
    let config = ConfigLoader::load_from(config_path)?;
    let db = connect(&config).await?;

    let state = Arc::new(ApiState::new(db));
    ApiServer::new(state).serve(&config.server.addr()).await
}

/// Runs the aggregation worker in the foreground until Ctrl-C.
async fn run_worker(config_path: &str) -> anyhow::Result<()> {
    let config = ConfigLoader::load_from(config_path)?;
    let db = connect(&config).await?;

    let (stop_tx, handle) = spawn_worker(&config, &db);

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");

    let _ = stop_tx.send(true);
    handle.await?;

    Ok(())
}

fn spawn_worker(
    config: &AppConfig,
    db: &Database,
) -> (watch::Sender<bool>, tokio::task::JoinHandle<()>) {
    let repos = Repositories::new(db.pool());
    let processor = TradeProcessor::new(repos.queue);
    let worker = PollWorker::new(
        processor,
        Duration::from_millis(config.worker.poll_interval_ms),
    );

    let (stop_tx, stop_rx) = watch::channel(false);
    let handle = tokio::spawn(worker.run(stop_rx));

    (stop_tx, handle)
}

async fn connect(config: &AppConfig) -> anyhow::Result<Database> {
    ensure_sqlite_dir(&config.database.url)?;
    Database::new(&config.database.url, config.database.max_connections).await
}

/// Ensures the parent directory of a file-backed SQLite URL exists.
fn ensure_sqlite_dir(database_url: &str) -> anyhow::Result<()> {
    if let Some(file_path) = database_url.strip_prefix("sqlite://") {
        let file_path = file_path.split('?').next().unwrap_or(file_path);
        if file_path.starts_with(':') {
            // in-memory database, nothing to create
            return Ok(());
        }
        let path = std::path::Path::new(file_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tracing::info!(
                    "Creating directory for SQLite database: {}",
                    parent.display()
                );
                std::fs::create_dir_all(parent)?;
            }
        }
    }
    Ok(())
}
