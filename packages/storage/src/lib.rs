// ABOUTME: Document store for TaskFlow tasks and categories backed by SQLite
// ABOUTME: One storage type per resource plus shared connection state

use thiserror::Error;

pub mod categories;
pub mod db;
pub mod tasks;

pub use categories::CategoryStorage;
pub use db::{run_migrations, DbState};
pub use tasks::TaskStorage;

use taskflow_core::ValidationError;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Duplicate category name: {0}")]
    DuplicateName(String),
    #[error("Invalid stored value: {0}")]
    InvalidFormat(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}
