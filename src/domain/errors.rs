use std::error::Error;
use std::fmt;

use crate::infrastructure::persistence::error::DbError;

/// Error type for deposit ingestion and ledger writes
#[derive(Debug)]
pub enum DepositError {
    Db(DbError),
    BadAmount(String),
    /// The deposit insert failed and the existing deposit row could not be
    /// read back either; quotes both failures
    IngestFatal {
        insert: String,
        read: String,
    },
}

impl fmt::Display for DepositError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepositError::Db(e) => write!(f, "Store error: {}", e),
            DepositError::BadAmount(msg) => write!(f, "Bad amount: {}", msg),
            DepositError::IngestFatal { insert, read } => write!(
                f,
                "Deposit insert failed ({}) and the deposit could not be read back ({})",
                insert, read
            ),
        }
    }
}

impl Error for DepositError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DepositError::Db(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DbError> for DepositError {
    fn from(error: DbError) -> Self {
        DepositError::Db(error)
    }
}

/// Error type for settlement operations
#[derive(Debug)]
pub enum SettlementError {
    Db(DbError),
    /// A direct settle matched no row
    SettleFailed(String),
    /// A stored amount or balance string failed to parse
    BadAmount(String),
}

impl fmt::Display for SettlementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlementError::Db(e) => write!(f, "Store error: {}", e),
            SettlementError::SettleFailed(id) => {
                write!(f, "Settle failed: no transaction {} to update", id)
            }
            SettlementError::BadAmount(msg) => write!(f, "Bad amount: {}", msg),
        }
    }
}

impl Error for SettlementError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SettlementError::Db(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DbError> for SettlementError {
    fn from(error: DbError) -> Self {
        SettlementError::Db(error)
    }
}
