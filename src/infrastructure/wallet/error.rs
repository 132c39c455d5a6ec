use std::error::Error;
use std::fmt;

/// Error type for wallet generator calls
#[derive(Debug)]
pub enum WalletError {
    /// Transport failure reaching the generator
    NetworkError(String),
    /// Malformed generator response
    ParseError(String),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::NetworkError(msg) => write!(f, "Wallet network error: {}", msg),
            WalletError::ParseError(msg) => write!(f, "Wallet parse error: {}", msg),
        }
    }
}

impl Error for WalletError {}
