//! Deposit ingestion
//!
//! Turns externally observed blockchain transactions into `(Deposit,
//! Transaction)` pairs, exactly once per on-chain transaction id no matter
//! how often the observer replays.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DepositError;
use crate::domain::models::{
    parse_amount, BlockchainTransaction, Deposit, Transaction, TransactionKind,
};
use crate::domain::services::sharding;
use crate::infrastructure::persistence::repositories::{
    AccountRepository, DepositRepository, TransactionRepository,
};
use crate::utils::logging;

/// A materialized deposit and its ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestedDeposit {
    pub deposit: Deposit,
    pub transaction: Transaction,
}

/// Ingests observed blockchain transactions against the account ledger
#[derive(Clone)]
pub struct DepositService {
    accounts: AccountRepository,
    deposits: DepositRepository,
    transactions: TransactionRepository,
}

impl DepositService {
    /// Create a new DepositService
    pub fn new(
        accounts: AccountRepository,
        deposits: DepositRepository,
        transactions: TransactionRepository,
    ) -> Self {
        Self {
            accounts,
            deposits,
            transactions,
        }
    }

    /// Ingest one observed blockchain transaction
    ///
    /// Returns `None` when the sender is not one of our deposit wallet
    /// addresses. Replays return the already-materialized pair unchanged.
    pub async fn ingest(
        &self,
        observed: &BlockchainTransaction,
    ) -> Result<Option<IngestedDeposit>, DepositError> {
        let account = match self
            .accounts
            .find_by_deposit_wallet_address(&observed.sender_id)
            .await?
        {
            Some(account) => account,
            None => return Ok(None),
        };

        let amount = parse_amount(&observed.amount)
            .map_err(DepositError::BadAmount)?
            .to_string();

        let transaction_id = Uuid::new_v4().to_string();

        match self
            .deposits
            .create(&observed.id, &account.id, &transaction_id, observed.height)
            .await
        {
            Ok(deposit) => {
                let transaction = self
                    .exec_transaction_with_id(
                        &transaction_id,
                        &account.id,
                        TransactionKind::Deposit,
                        &amount,
                    )
                    .await?;
                Ok(Some(IngestedDeposit {
                    deposit,
                    transaction,
                }))
            }
            // Insert failures are presumed replays; recover from the
            // existing rows rather than trusting the error shape
            Err(insert_err) => {
                self.recover_existing(observed, &amount, insert_err.to_string())
                    .await
                    .map(Some)
            }
        }
    }

    /// Create an unsettled ledger transaction for an account
    ///
    /// This is the only place ledger rows are minted: every row gets
    /// `settled = false` and its account's shard key, so no transaction can
    /// leak out of settlement.
    pub async fn exec_transaction(
        &self,
        account_id: &str,
        kind: TransactionKind,
        amount: &str,
    ) -> Result<Transaction, DepositError> {
        self.exec_transaction_with_id(&Uuid::new_v4().to_string(), account_id, kind, amount)
            .await
    }

    async fn exec_transaction_with_id(
        &self,
        id: &str,
        account_id: &str,
        kind: TransactionKind,
        amount: &str,
    ) -> Result<Transaction, DepositError> {
        let amount = parse_amount(amount)
            .map_err(DepositError::BadAmount)?
            .to_string();
        let shard_key = sharding::shard_key(account_id);

        let transaction = self
            .transactions
            .create(id, account_id, kind, &amount, &shard_key)
            .await?;

        Ok(transaction)
    }

    /// Recovery path for a failed deposit insert
    ///
    /// The deposit has been seen before, or a past run crashed between the
    /// deposit insert and the transaction insert. Either way the existing
    /// deposit row decides the transaction id.
    async fn recover_existing(
        &self,
        observed: &BlockchainTransaction,
        amount: &str,
        insert_err: String,
    ) -> Result<IngestedDeposit, DepositError> {
        let deposit = match self.deposits.get_by_id(&observed.id).await {
            Ok(Some(deposit)) => deposit,
            Ok(None) => {
                return Err(DepositError::IngestFatal {
                    insert: insert_err,
                    read: format!("no deposit row with id {}", observed.id),
                })
            }
            Err(read_err) => {
                return Err(DepositError::IngestFatal {
                    insert: insert_err,
                    read: read_err.to_string(),
                })
            }
        };

        match self.transactions.get_by_id(&deposit.transaction_id).await? {
            Some(transaction) => Ok(IngestedDeposit {
                deposit,
                transaction,
            }),
            None => {
                // A past crash left the deposit without its transaction;
                // finish the job under the recorded transaction id
                logging::log_warning(&format!(
                    "Deposit {} has no transaction {}; repairing",
                    deposit.id, deposit.transaction_id
                ));
                let transaction = self
                    .exec_transaction_with_id(
                        &deposit.transaction_id,
                        &deposit.account_id,
                        TransactionKind::Deposit,
                        amount,
                    )
                    .await?;
                Ok(IngestedDeposit {
                    deposit,
                    transaction,
                })
            }
        }
    }
}
