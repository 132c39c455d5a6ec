use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain model for a custodial account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account ID
    pub id: String,

    /// Unique username, trimmed at signup
    pub username: String,

    /// Hex-encoded SHA-256 of `password || password_salt`
    pub password: String,

    /// Hex-encoded 32-byte random salt
    pub password_salt: String,

    /// Inactive accounts cannot log in but their ledger still settles
    pub active: bool,

    /// Creation time
    pub created_date: DateTime<Utc>,

    /// Unique blockchain address at which this account receives deposits
    pub deposit_wallet_address: String,

    /// Wallet passphrase
    pub deposit_wallet_passphrase: String,

    /// Wallet private key
    pub deposit_wallet_private_key: String,

    /// Wallet public key
    pub deposit_wallet_public_key: String,
}
