// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and per-resource storage

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::{debug, info};

use crate::{CategoryStorage, StorageError, StorageResult, TaskStorage};

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub task_storage: Arc<TaskStorage>,
    pub category_storage: Arc<CategoryStorage>,
}

impl DbState {
    /// Create new database state from a migrated SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let task_storage = Arc::new(TaskStorage::new(pool.clone()));
        let category_storage = Arc::new(CategoryStorage::new(pool.clone()));

        Self {
            pool,
            task_storage,
            category_storage,
        }
    }

    /// Initialize database state at the default location (~/.taskflow/taskflow.db)
    pub async fn init() -> StorageResult<Self> {
        Self::init_with_path(None).await
    }

    /// Initialize database state with optional custom database path
    pub async fn init_with_path(database_path: Option<PathBuf>) -> StorageResult<Self> {
        let database_path = database_path.unwrap_or_else(taskflow_core::database_file);

        // Ensure parent directory exists
        if let Some(parent) = database_path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }

        let database_url = format!("sqlite://{}?mode=rwc", database_path.display());

        debug!("Connecting to database: {}", database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(&database_url)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        info!("Database connection established");

        run_migrations(&pool).await?;

        Ok(Self::new(pool))
    }

    /// Private in-memory database. A single connection keeps every query on
    /// the same memory database.
    pub async fn in_memory() -> StorageResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(StorageError::Sqlx)?;

        run_migrations(&pool).await?;

        Ok(Self::new(pool))
    }
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &SqlitePool) -> StorageResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(StorageError::Migration)?;

    debug!("Database migrations completed");
    Ok(())
}
