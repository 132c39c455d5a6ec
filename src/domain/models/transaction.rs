use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four ledger event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Credit,
    Debit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Credit => "credit",
            TransactionKind::Debit => "debit",
            TransactionKind::Withdrawal => "withdrawal",
        }
    }

    /// Whether this kind adds to the balance; debits and withdrawals subtract
    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::Credit)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(TransactionKind::Deposit),
            "credit" => Ok(TransactionKind::Credit),
            "debit" => Ok(TransactionKind::Debit),
            "withdrawal" => Ok(TransactionKind::Withdrawal),
            other => Err(format!("unknown transaction kind: {}", other)),
        }
    }
}

/// Domain model for a ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID
    pub id: String,

    /// Owning account
    pub account_id: String,

    /// Event type
    pub kind: TransactionKind,

    /// Non-negative amount as a canonical decimal string
    pub amount: String,

    /// Creation time; settlement folds per account in this order
    pub created_date: DateTime<Utc>,

    /// Whether settlement has folded this transaction
    pub settled: bool,

    /// Settlement time
    pub settled_date: Option<DateTime<Utc>>,

    /// Running balance after this transaction; meaningful only when settled
    pub balance: Option<String>,

    /// Set when applying a debit or withdrawal would have driven the
    /// balance negative; the balance stands unchanged
    pub canceled: bool,

    /// Shard routing key; retained only by the newest settled transaction
    /// of each account once settlement has quiesced
    pub settlement_shard_key: Option<String>,
}

impl Transaction {
    /// Parse the stored amount
    pub fn amount_value(&self) -> Result<BigDecimal, String> {
        parse_amount(&self.amount)
    }
}

/// Parse a monetary amount string into a big decimal
///
/// Amounts must be non-negative integers; the ledger has no fractional
/// units and never touches floating point.
pub fn parse_amount(raw: &str) -> Result<BigDecimal, String> {
    let value = BigDecimal::from_str(raw.trim())
        .map_err(|e| format!("invalid amount {:?}: {}", raw, e))?;

    if !value.is_integer() {
        return Err(format!("invalid amount {:?}: not an integer", raw));
    }
    if value < BigDecimal::zero() {
        return Err(format!("invalid amount {:?}: negative", raw));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integers() {
        assert_eq!(parse_amount("500").unwrap().to_string(), "500");
        assert_eq!(parse_amount("0").unwrap().to_string(), "0");
    }

    #[test]
    fn parses_amounts_beyond_u64() {
        let big = "123456789012345678901234567890";
        assert_eq!(parse_amount(big).unwrap().to_string(), big);
    }

    #[test]
    fn rejects_negative_and_fractional() {
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("1.5").is_err());
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [
            TransactionKind::Deposit,
            TransactionKind::Credit,
            TransactionKind::Debit,
            TransactionKind::Withdrawal,
        ] {
            assert_eq!(kind.as_str().parse::<TransactionKind>().unwrap(), kind);
        }
        assert!("transfer".parse::<TransactionKind>().is_err());
    }
}
