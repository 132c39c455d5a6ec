//! Signup sanitization and login verification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::models::Account;
use crate::domain::services::credential_hasher;
use crate::infrastructure::persistence::repositories::AccountRepository;
use crate::infrastructure::wallet::{GeneratedWallet, WalletGenerator};
use crate::utils::logging;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 30;
pub const MIN_PASSWORD_LENGTH: usize = 7;
pub const MAX_PASSWORD_LENGTH: usize = 50;
pub const MAX_WALLET_CREATE_ATTEMPTS: u32 = 10;

/// Error kinds surfaced by signup and login
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("No credentials provided")]
    NoCredentialsProvided,

    #[error("Username must be 3 to 30 characters")]
    InvalidUsername,

    #[error("Password must be 7 to 50 characters")]
    InvalidPassword,

    #[error("Account lookup failed: {0}")]
    BadAccountLookup(String),

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Could not create account: {0}")]
    AccountCreate(String),

    /// One kind and one message for unknown-username and wrong-password;
    /// callers cannot probe which usernames exist
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is inactive")]
    AccountInactive,
}

/// Raw signup input; both fields must be present
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Signup output: the validated, salted, hashed, wallet-assigned record
///
/// Sanitization never writes to the store; persisting this record is the
/// caller's move (or use [`CredentialService::create_account`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizedCredentials {
    pub username: String,
    pub password: String,
    pub password_salt: String,
    pub active: bool,
    pub created_date: DateTime<Utc>,
    pub deposit_wallet_address: String,
    pub deposit_wallet_passphrase: String,
    pub deposit_wallet_private_key: String,
    pub deposit_wallet_public_key: String,
}

/// Signup and login against the account store
pub struct CredentialService {
    accounts: AccountRepository,
    wallet_generator: Arc<dyn WalletGenerator>,
}

impl CredentialService {
    /// Create a new CredentialService
    pub fn new(accounts: AccountRepository, wallet_generator: Arc<dyn WalletGenerator>) -> Self {
        Self {
            accounts,
            wallet_generator,
        }
    }

    /// Validate and augment signup credentials
    ///
    /// Performs read-only uniqueness probes only. A concurrent signup can
    /// still pass both probes; the unique indices resolve that race at
    /// insert time.
    pub async fn sanitize_signup_credentials(
        &self,
        request: &SignupRequest,
    ) -> Result<SanitizedCredentials, CredentialError> {
        let (username, password) = match (&request.username, &request.password) {
            (Some(u), Some(p)) => (u, p),
            _ => return Err(CredentialError::NoCredentialsProvided),
        };

        let len = username.chars().count();
        if len < MIN_USERNAME_LENGTH || len > MAX_USERNAME_LENGTH {
            return Err(CredentialError::InvalidUsername);
        }
        let username = username.trim().to_string();

        let len = password.chars().count();
        if len < MIN_PASSWORD_LENGTH || len > MAX_PASSWORD_LENGTH {
            return Err(CredentialError::InvalidPassword);
        }

        let password_salt = credential_hasher::generate_salt();
        let password = credential_hasher::hash_password(password, &password_salt);

        // Uniqueness probe on the username
        match self.accounts.find_by_username(&username).await {
            Ok(None) => {}
            Ok(Some(_)) => return Err(CredentialError::UsernameTaken),
            Err(e) => return Err(CredentialError::BadAccountLookup(e.to_string())),
        }

        let wallet = self.allocate_deposit_wallet().await?;

        Ok(SanitizedCredentials {
            username,
            password,
            password_salt,
            active: true,
            created_date: Utc::now(),
            deposit_wallet_address: wallet.address,
            deposit_wallet_passphrase: wallet.passphrase,
            deposit_wallet_private_key: wallet.private_key,
            deposit_wallet_public_key: wallet.public_key,
        })
    }

    /// Sanitize and persist in one step
    ///
    /// A unique-index rejection on the insert means a concurrent signup won
    /// the race after our probes passed; it maps to the same kinds the
    /// probes raise.
    pub async fn create_account(
        &self,
        request: &SignupRequest,
    ) -> Result<Account, CredentialError> {
        let credentials = self.sanitize_signup_credentials(request).await?;

        let account = Account {
            id: Uuid::new_v4().to_string(),
            username: credentials.username,
            password: credentials.password,
            password_salt: credentials.password_salt,
            active: credentials.active,
            created_date: credentials.created_date,
            deposit_wallet_address: credentials.deposit_wallet_address,
            deposit_wallet_passphrase: credentials.deposit_wallet_passphrase,
            deposit_wallet_private_key: credentials.deposit_wallet_private_key,
            deposit_wallet_public_key: credentials.deposit_wallet_public_key,
        };

        match self.accounts.create(&account).await {
            Ok(created) => Ok(created),
            Err(e) if e.is_unique_violation() => {
                let message = e.to_string();
                if message.contains("username") {
                    Err(CredentialError::UsernameTaken)
                } else {
                    Err(CredentialError::AccountCreate(message))
                }
            }
            Err(e) => Err(CredentialError::AccountCreate(e.to_string())),
        }
    }

    /// Verify login credentials, returning the account on success
    pub async fn verify_login_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Account, CredentialError> {
        let username = username.trim();

        let account = match self.accounts.find_by_username(username).await {
            Ok(Some(account)) => account,
            Ok(None) => return Err(CredentialError::InvalidCredentials),
            Err(e) => return Err(CredentialError::BadAccountLookup(e.to_string())),
        };

        if !account.active {
            return Err(CredentialError::AccountInactive);
        }

        let hash = credential_hasher::hash_password(password, &account.password_salt);
        if hash != account.password {
            return Err(CredentialError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Allocate a deposit wallet whose address is not yet in use
    ///
    /// The generator is external and may hand back an address we already
    /// assigned; probe and retry a bounded number of times.
    async fn allocate_deposit_wallet(&self) -> Result<GeneratedWallet, CredentialError> {
        for attempt in 1..=MAX_WALLET_CREATE_ATTEMPTS {
            let wallet = self
                .wallet_generator
                .generate()
                .await
                .map_err(|e| CredentialError::AccountCreate(e.to_string()))?;

            match self
                .accounts
                .find_by_deposit_wallet_address(&wallet.address)
                .await
            {
                Ok(None) => return Ok(wallet),
                Ok(Some(_)) => {
                    logging::log_warning(&format!(
                        "Deposit wallet address collision (attempt {}/{})",
                        attempt, MAX_WALLET_CREATE_ATTEMPTS
                    ));
                }
                Err(e) => return Err(CredentialError::BadAccountLookup(e.to_string())),
            }
        }

        Err(CredentialError::AccountCreate(format!(
            "no unused deposit wallet address in {} attempts",
            MAX_WALLET_CREATE_ATTEMPTS
        )))
    }
}
