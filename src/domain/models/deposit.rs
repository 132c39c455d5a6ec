use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain model for an ingested deposit
///
/// `id` equals the originating blockchain transaction id; replaying the
/// same on-chain transaction collides here instead of crediting twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deposit {
    /// Deposit ID (the blockchain transaction id)
    pub id: String,

    /// Account credited by this deposit
    pub account_id: String,

    /// Internal ledger transaction materialized for this deposit
    pub transaction_id: String,

    /// Source chain height at which the deposit was observed
    pub height: i64,

    /// Ingestion time
    pub created_date: DateTime<Utc>,
}
