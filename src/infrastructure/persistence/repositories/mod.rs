pub mod account_repository;
pub mod deposit_repository;
pub mod transaction_repository;

pub use account_repository::AccountRepository;
pub use deposit_repository::DepositRepository;
pub use transaction_repository::TransactionRepository;

/// Container for all repositories
#[derive(Clone)]
pub struct Repositories {
    pub account: AccountRepository,
    pub deposit: DepositRepository,
    pub transaction: TransactionRepository,
}

impl Repositories {
    pub fn new(
        account: AccountRepository,
        deposit: DepositRepository,
        transaction: TransactionRepository,
    ) -> Self {
        Self {
            account,
            deposit,
            transaction,
        }
    }
}
