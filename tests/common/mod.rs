#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicU32, Ordering};

use custody_core::domain::models::Account;
use custody_core::infrastructure::persistence::{DbPool, Repositories, RepositoryFactory};
use custody_core::infrastructure::wallet::{GeneratedWallet, WalletError, WalletGenerator};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};

/// Stand up an in-memory store with the real schema
pub async fn setup_store() -> Repositories {
    // A pool of one connection keeps every query on the same in-memory
    // database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let conn = Database::connect(options)
        .await
        .expect("Failed to open in-memory store");

    Migrator::up(&conn, None)
        .await
        .expect("Failed to run migrations");

    RepositoryFactory::create_repositories(&DbPool::from_connection(conn))
}

/// Wallet generator that mints a fresh address per call
#[derive(Default)]
pub struct SequenceWalletGenerator {
    counter: AtomicU32,
}

#[async_trait]
impl WalletGenerator for SequenceWalletGenerator {
    async fn generate(&self) -> Result<GeneratedWallet, WalletError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(GeneratedWallet {
            address: format!("wallet-address-{}", n),
            passphrase: format!("passphrase-{}", n),
            private_key: format!("private-key-{}", n),
            public_key: format!("public-key-{}", n),
        })
    }
}

/// Wallet generator stuck on a single address, for collision tests
pub struct FixedWalletGenerator {
    pub address: String,
}

#[async_trait]
impl WalletGenerator for FixedWalletGenerator {
    async fn generate(&self) -> Result<GeneratedWallet, WalletError> {
        Ok(GeneratedWallet {
            address: self.address.clone(),
            passphrase: "passphrase".to_string(),
            private_key: "private-key".to_string(),
            public_key: "public-key".to_string(),
        })
    }
}

/// Build an account row directly, bypassing signup
pub fn test_account(id: &str, username: &str, deposit_wallet_address: &str) -> Account {
    Account {
        id: id.to_string(),
        username: username.to_string(),
        password: "0".repeat(64),
        password_salt: "0".repeat(64),
        active: true,
        created_date: Utc::now(),
        deposit_wallet_address: deposit_wallet_address.to_string(),
        deposit_wallet_passphrase: "passphrase".to_string(),
        deposit_wallet_private_key: "private-key".to_string(),
        deposit_wallet_public_key: "public-key".to_string(),
    }
}
