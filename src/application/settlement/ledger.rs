//! Per-account ledger state assembled from a shard scan

use bigdecimal::{BigDecimal, Zero};
use std::collections::HashMap;

use crate::domain::models::{Transaction, TransactionKind};

/// One account's view of a shard scan: what is already settled and what
/// still needs folding, both in fold order
#[derive(Debug)]
pub struct AccountLedger {
    pub account_id: String,
    /// Already-settled rows that still carried a shard key, oldest first.
    /// After a clean prune this holds at most the one newest settled row.
    pub settled: Vec<Transaction>,
    /// Unsettled rows, oldest first
    pub unsettled: Vec<Transaction>,
}

impl AccountLedger {
    /// Seed balance for the fold: the newest settled row's balance, or
    /// zero when the account has never settled
    pub fn seed_balance(&self) -> Result<BigDecimal, String> {
        match self.settled.last() {
            Some(row) => match &row.balance {
                Some(balance) => crate::domain::models::parse_amount(balance),
                None => Err(format!(
                    "settled transaction {} has no balance to seed from",
                    row.id
                )),
            },
            None => Ok(BigDecimal::zero()),
        }
    }
}

/// Group a shard scan into per-account ledgers
///
/// Rows must arrive in fold order (created date ascending, id tiebreak);
/// grouping preserves that order within each account.
pub fn build_ledgers(rows: Vec<Transaction>) -> Vec<AccountLedger> {
    let mut order: Vec<String> = Vec::new();
    let mut by_account: HashMap<String, AccountLedger> = HashMap::new();

    for row in rows {
        let ledger = by_account
            .entry(row.account_id.clone())
            .or_insert_with(|| {
                order.push(row.account_id.clone());
                AccountLedger {
                    account_id: row.account_id.clone(),
                    settled: Vec::new(),
                    unsettled: Vec::new(),
                }
            });

        if row.settled {
            ledger.settled.push(row);
        } else {
            ledger.unsettled.push(row);
        }
    }

    order
        .into_iter()
        .filter_map(|account_id| by_account.remove(&account_id))
        .collect()
}

/// Apply one transaction to a running balance
///
/// Returns the balance after the transaction and whether it was canceled.
/// Debits and withdrawals that would drive the balance negative are
/// canceled and leave the balance unchanged.
pub fn apply_transaction(
    balance: &BigDecimal,
    kind: TransactionKind,
    amount: &BigDecimal,
) -> (BigDecimal, bool) {
    if kind.is_credit() {
        (balance + amount, false)
    } else {
        let next = balance - amount;
        if next < BigDecimal::zero() {
            (balance.clone(), true)
        } else {
            (next, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    fn tx(id: &str, account_id: &str, settled: bool, balance: Option<&str>) -> Transaction {
        Transaction {
            id: id.to_string(),
            account_id: account_id.to_string(),
            kind: TransactionKind::Credit,
            amount: "10".to_string(),
            created_date: Utc::now(),
            settled,
            settled_date: None,
            balance: balance.map(|b| b.to_string()),
            canceled: false,
            settlement_shard_key: Some("0000000000000000".to_string()),
        }
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn credits_add_and_debits_subtract() {
        let (balance, canceled) =
            apply_transaction(&dec("100"), TransactionKind::Deposit, &dec("50"));
        assert_eq!(balance, dec("150"));
        assert!(!canceled);

        let (balance, canceled) =
            apply_transaction(&dec("150"), TransactionKind::Withdrawal, &dec("150"));
        assert_eq!(balance, dec("0"));
        assert!(!canceled);
    }

    #[test]
    fn overdraft_cancels_and_keeps_balance() {
        let (balance, canceled) = apply_transaction(&dec("500"), TransactionKind::Debit, &dec("700"));
        assert_eq!(balance, dec("500"));
        assert!(canceled);
    }

    #[test]
    fn seed_balance_comes_from_newest_settled_row() {
        let ledger = AccountLedger {
            account_id: "a".to_string(),
            settled: vec![
                tx("t1", "a", true, Some("100")),
                tx("t2", "a", true, Some("250")),
            ],
            unsettled: vec![],
        };
        assert_eq!(ledger.seed_balance().unwrap(), dec("250"));
    }

    #[test]
    fn seed_balance_defaults_to_zero() {
        let ledger = AccountLedger {
            account_id: "a".to_string(),
            settled: vec![],
            unsettled: vec![tx("t1", "a", false, None)],
        };
        assert_eq!(ledger.seed_balance().unwrap(), BigDecimal::zero());
    }

    #[test]
    fn grouping_preserves_scan_order() {
        let rows = vec![
            tx("t1", "a", true, Some("5")),
            tx("t2", "b", false, None),
            tx("t3", "a", false, None),
            tx("t4", "a", false, None),
        ];

        let ledgers = build_ledgers(rows);
        assert_eq!(ledgers.len(), 2);
        assert_eq!(ledgers[0].account_id, "a");
        assert_eq!(ledgers[0].settled.len(), 1);
        assert_eq!(
            ledgers[0]
                .unsettled
                .iter()
                .map(|t| t.id.as_str())
                .collect::<Vec<_>>(),
            vec!["t3", "t4"]
        );
        assert_eq!(ledgers[1].account_id, "b");
        assert_eq!(ledgers[1].unsettled.len(), 1);
    }
}
