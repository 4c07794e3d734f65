//! Error types for database operations

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum Error {
    /// SQLx database error
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be mapped back to a domain value
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for database operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the failure means the database could not be reached at all
    pub fn is_connection(&self) -> bool {
        match self {
            Error::Sqlx(e) => matches!(
                e,
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            ),
            Error::Io(_) => true,
            Error::Migration(_) | Error::InvalidData(_) => false,
        }
    }
}

impl From<Error> for rota_core::Error {
    fn from(err: Error) -> Self {
        if err.is_connection() {
            rota_core::Error::Connection(err.to_string())
        } else {
            rota_core::Error::QueryExecution(err.to_string())
        }
    }
}
