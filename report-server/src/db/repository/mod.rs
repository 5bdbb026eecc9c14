//! Repository Module
//!
//! SQLite-backed data access. Repositories take a `SqlitePool` and speak in
//! Unix millis; business-timezone handling stays in the layers above.

pub mod order;

pub use order::OrderRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
