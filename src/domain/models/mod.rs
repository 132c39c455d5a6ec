pub mod account;
pub mod blockchain_transaction;
pub mod deposit;
pub mod transaction;

pub use account::Account;
pub use blockchain_transaction::BlockchainTransaction;
pub use deposit::Deposit;
pub use transaction::{parse_amount, Transaction, TransactionKind};
