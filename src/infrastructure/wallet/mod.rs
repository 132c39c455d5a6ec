//! Deposit wallet generation
//!
//! The wallet generator is an external collaborator; this module holds the
//! provider seam and the JSON-RPC client implementation used in production.

pub mod error;
pub mod rpc;

pub use error::WalletError;
pub use rpc::WalletRpcGenerator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A freshly generated deposit wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedWallet {
    pub address: String,
    pub passphrase: String,
    pub private_key: String,
    pub public_key: String,
}

/// Trait for wallet generator providers
#[async_trait]
pub trait WalletGenerator: Send + Sync {
    /// Generate a new wallet key tuple
    async fn generate(&self) -> Result<GeneratedWallet, WalletError>;
}
