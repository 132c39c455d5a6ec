use std::error::Error;
use std::fmt;

/// Error type for store operations
#[derive(Debug)]
pub enum DbError {
    /// A unique index rejected the write (duplicate username, wallet
    /// address, or deposit id)
    UniqueViolation(String),
    /// Connection error
    ConnectionError(String),
    /// Query error
    QueryError(String),
    /// Other error
    Other(String),
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbError::UniqueViolation(msg) => write!(f, "Unique constraint violation: {}", msg),
            DbError::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            DbError::QueryError(msg) => write!(f, "Query error: {}", msg),
            DbError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl Error for DbError {}

impl From<sea_orm::DbErr> for DbError {
    fn from(err: sea_orm::DbErr) -> Self {
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) = err.sql_err() {
            return DbError::UniqueViolation(msg);
        }

        let message = err.to_string();

        // Not every driver path surfaces a structured code; Postgres says
        // "duplicate key value violates unique constraint", SQLite says
        // "UNIQUE constraint failed"
        if message.contains("duplicate key") || message.contains("UNIQUE constraint") {
            DbError::UniqueViolation(message)
        } else {
            DbError::QueryError(message)
        }
    }
}

impl DbError {
    /// Whether this error is a unique index rejection
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DbError::UniqueViolation(_))
    }
}
