use anyhow::Result;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// `SQLite` database handle shared by the ingestion API and the worker.
///
/// Uses connection pooling for concurrent access; schema creation runs
/// once, idempotently, through embedded migrations before either side
/// touches the tables.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Creates a new database connection pool and applies migrations.
    ///
    /// # Arguments
    ///
    /// * `database_url` - `SQLite` database path (e.g. `<sqlite://data/trades.db>`)
    /// * `max_connections` - Pool size shared by producers and the worker
    ///
    /// # Errors
    ///
    /// Returns error if connection fails or migrations fail.
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        tracing::info!("Connecting to database: {}", database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Creates an in-memory database for testing.
    ///
    /// The pool is capped at a single connection: every new
    /// `sqlite::memory:` connection opens a fresh empty database, so a
    /// larger pool would hand out connections without the migrated schema.
    ///
    /// # Errors
    ///
    /// Returns error if connection fails.
    pub async fn new_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a clone of the underlying pool.
    #[must_use]
    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Performs a storage round trip, used by the liveness probe.
    ///
    /// # Errors
    ///
    /// Returns error if the database is unreachable.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
