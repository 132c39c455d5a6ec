//! The settlement engine: gather, fold, prune

use futures::future::join_all;

use crate::application::settlement::ledger::{apply_transaction, build_ledgers, AccountLedger};
use crate::domain::errors::SettlementError;
use crate::domain::services::sharding::ShardAssignment;
use crate::infrastructure::persistence::repositories::TransactionRepository;
use crate::utils::logging;

/// Outcome counters for one settlement tick
#[derive(Debug, Default, Clone, Copy)]
pub struct TickSummary {
    /// Accounts with rows in this worker's shard range
    pub accounts: usize,
    /// Transactions folded and stamped settled
    pub settled: usize,
    /// Of those, overdrafts canceled
    pub canceled: usize,
    /// Shard keys cleared
    pub pruned: usize,
    /// Accounts whose fold stopped early on an error
    pub failed_accounts: usize,
}

#[derive(Debug, Default)]
struct AccountOutcome {
    settled: usize,
    canceled: usize,
    pruned: usize,
    failed: bool,
}

/// Settles one shard of the transaction stream
pub struct SettlementEngine {
    transactions: TransactionRepository,
    assignment: ShardAssignment,
}

impl SettlementEngine {
    /// Create a new SettlementEngine for one shard assignment
    pub fn new(transactions: TransactionRepository, assignment: ShardAssignment) -> Self {
        Self {
            transactions,
            assignment,
        }
    }

    pub fn assignment(&self) -> ShardAssignment {
        self.assignment
    }

    /// Run one settlement tick over this worker's shard range
    ///
    /// A store error during the gather aborts the tick; the next tick
    /// retries from scratch. Errors on individual rows stop only that
    /// account's fold and the rows re-enter the next tick.
    pub async fn tick(&self) -> Result<TickSummary, SettlementError> {
        let range = self.assignment.range();
        let rows = self
            .transactions
            .find_by_shard_key_range(&range.start, range.end.as_deref())
            .await?;

        let ledgers = build_ledgers(rows);

        let mut summary = TickSummary {
            accounts: ledgers.len(),
            ..TickSummary::default()
        };

        // Accounts are independent; settle them concurrently. Rows within
        // an account stay strictly sequential inside settle_account.
        let outcomes = join_all(
            ledgers
                .into_iter()
                .map(|ledger| self.settle_account(ledger)),
        )
        .await;

        for outcome in outcomes {
            summary.settled += outcome.settled;
            summary.canceled += outcome.canceled;
            summary.pruned += outcome.pruned;
            if outcome.failed {
                summary.failed_accounts += 1;
            }
        }

        Ok(summary)
    }

    /// Mark one transaction settled without folding a balance
    ///
    /// Administrative bypass: calling this on a row that is still in the
    /// unsettled stream corrupts the running balance for its account.
    pub async fn settle_transaction(&self, id: &str) -> Result<(), SettlementError> {
        let updated = self.transactions.mark_settled(id).await?;
        if updated == 0 {
            return Err(SettlementError::SettleFailed(id.to_string()));
        }
        Ok(())
    }

    /// Fold and prune a single account
    async fn settle_account(&self, ledger: AccountLedger) -> AccountOutcome {
        let mut outcome = AccountOutcome::default();

        let mut balance = match ledger.seed_balance() {
            Ok(balance) => balance,
            Err(msg) => {
                logging::log_error(&format!(
                    "Skipping account {}: {}",
                    ledger.account_id, msg
                ));
                outcome.failed = true;
                return outcome;
            }
        };

        // Ids of settled rows in fold order; seeded with rows that were
        // already settled in the scan so stale keys from a failed prune
        // get cleared too
        let mut settled_ids: Vec<String> =
            ledger.settled.iter().map(|t| t.id.clone()).collect();

        for transaction in &ledger.unsettled {
            let amount = match transaction.amount_value() {
                Ok(amount) => amount,
                Err(msg) => {
                    logging::log_error(&format!(
                        "Stopping fold for account {} at transaction {}: {}",
                        ledger.account_id, transaction.id, msg
                    ));
                    outcome.failed = true;
                    break;
                }
            };

            let (next_balance, canceled) =
                apply_transaction(&balance, transaction.kind, &amount);

            match self
                .transactions
                .apply_settlement(&transaction.id, &next_balance.to_string(), canceled)
                .await
            {
                Ok(()) => {
                    balance = next_balance;
                    settled_ids.push(transaction.id.clone());
                    outcome.settled += 1;
                    if canceled {
                        outcome.canceled += 1;
                    }
                }
                Err(e) => {
                    // Later rows must not settle ahead of this one; leave
                    // the rest of the account for the next tick
                    logging::log_warning(&format!(
                        "Update failed for transaction {} (account {}): {}",
                        transaction.id, ledger.account_id, e
                    ));
                    outcome.failed = true;
                    break;
                }
            }
        }

        // Prune: every settled row but the newest drops its shard key, so
        // the next gather reads at most one settled row for this account
        if let Some(_newest) = settled_ids.pop() {
            for id in settled_ids {
                match self.transactions.clear_shard_key(&id).await {
                    Ok(()) => outcome.pruned += 1,
                    Err(e) => {
                        // Non-fatal: a stale key costs one extra row read
                        // on the next tick
                        logging::log_warning(&format!(
                            "Failed to clear shard key on {}: {}",
                            id, e
                        ));
                    }
                }
            }
        }

        outcome
    }
}
