use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::models::Account;
use crate::infrastructure::persistence::entities::accounts;
use crate::infrastructure::persistence::error::DbError;

/// Repository for account operations
#[derive(Clone)]
pub struct AccountRepository {
    conn: DatabaseConnection,
}

impl AccountRepository {
    /// Create a new AccountRepository
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a new account
    ///
    /// The unique indices on `username` and `deposit_wallet_address` reject
    /// duplicates here; concurrent signups that both passed their probes are
    /// resolved by this insert.
    pub async fn create(&self, account: &Account) -> Result<Account, DbError> {
        let model = accounts::ActiveModel {
            id: Set(account.id.clone()),
            username: Set(account.username.clone()),
            password: Set(account.password.clone()),
            password_salt: Set(account.password_salt.clone()),
            active: Set(account.active),
            created_date: Set(account.created_date.into()),
            deposit_wallet_address: Set(account.deposit_wallet_address.clone()),
            deposit_wallet_passphrase: Set(account.deposit_wallet_passphrase.clone()),
            deposit_wallet_private_key: Set(account.deposit_wallet_private_key.clone()),
            deposit_wallet_public_key: Set(account.deposit_wallet_public_key.clone()),
        };

        let inserted = model.insert(&self.conn).await?;

        Ok(Self::to_domain_model(inserted))
    }

    /// Get an account by its ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Account>, DbError> {
        let result = accounts::Entity::find_by_id(id).one(&self.conn).await?;

        Ok(result.map(Self::to_domain_model))
    }

    /// Find an account by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DbError> {
        let result = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.conn)
            .await?;

        Ok(result.map(Self::to_domain_model))
    }

    /// Find the account that owns a deposit wallet address
    pub async fn find_by_deposit_wallet_address(
        &self,
        address: &str,
    ) -> Result<Option<Account>, DbError> {
        let result = accounts::Entity::find()
            .filter(accounts::Column::DepositWalletAddress.eq(address))
            .one(&self.conn)
            .await?;

        Ok(result.map(Self::to_domain_model))
    }

    /// Flip the active flag on an account
    pub async fn set_active(&self, id: &str, active: bool) -> Result<(), DbError> {
        let existing = accounts::Entity::find_by_id(id).one(&self.conn).await?;

        match existing {
            Some(model) => {
                let mut update_model: accounts::ActiveModel = model.into();
                update_model.active = Set(active);
                update_model.update(&self.conn).await?;
                Ok(())
            }
            None => Err(DbError::Other(format!("account {} not found", id))),
        }
    }

    /// Convert a database entity to a domain model
    fn to_domain_model(entity: accounts::Model) -> Account {
        Account {
            id: entity.id,
            username: entity.username,
            password: entity.password,
            password_salt: entity.password_salt,
            active: entity.active,
            created_date: entity.created_date.with_timezone(&Utc),
            deposit_wallet_address: entity.deposit_wallet_address,
            deposit_wallet_passphrase: entity.deposit_wallet_passphrase,
            deposit_wallet_private_key: entity.deposit_wallet_private_key,
            deposit_wallet_public_key: entity.deposit_wallet_public_key,
        }
    }
}
