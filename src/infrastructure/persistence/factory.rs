use sea_orm::DatabaseConnection;

use crate::infrastructure::persistence::connection::DbPool;
use crate::infrastructure::persistence::repositories::{
    AccountRepository, DepositRepository, Repositories, TransactionRepository,
};

/// Factory for creating repositories
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create all repositories
    pub fn create_repositories(db_pool: &DbPool) -> Repositories {
        let conn = db_pool.get_connection().clone();

        Repositories::new(
            Self::create_account_repository(conn.clone()),
            Self::create_deposit_repository(conn.clone()),
            Self::create_transaction_repository(conn),
        )
    }

    /// Create an account repository
    pub fn create_account_repository(conn: DatabaseConnection) -> AccountRepository {
        AccountRepository::new(conn)
    }

    /// Create a deposit repository
    pub fn create_deposit_repository(conn: DatabaseConnection) -> DepositRepository {
        DepositRepository::new(conn)
    }

    /// Create a transaction repository
    pub fn create_transaction_repository(conn: DatabaseConnection) -> TransactionRepository {
        TransactionRepository::new(conn)
    }
}
