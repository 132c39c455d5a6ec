//! Sharded batch settlement
//!
//! Each worker owns one shard of the key space and periodically folds its
//! accounts' unsettled transactions into running balances.

pub mod engine;
pub mod ledger;
pub mod worker;

pub use engine::{SettlementEngine, TickSummary};
pub use ledger::AccountLedger;
pub use worker::SettlementWorker;
