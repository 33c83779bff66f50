//! Error types shared by the bloglist services
//!
//! Failures from the PostgreSQL layer are wrapped here so callers see where
//! a database operation went wrong without depending on sqlx directly.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Connecting to the bloglist database failed
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A query against the bloglist database failed
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// The database configuration in the environment is missing or invalid
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
