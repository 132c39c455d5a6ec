//! Settlement worker loop

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::application::settlement::engine::SettlementEngine;
use crate::config::AppConfig;
use crate::domain::services::sharding::ShardAssignment;
use crate::infrastructure::persistence::repositories::TransactionRepository;
use crate::utils::logging;

/// Runs a settlement engine on a fixed tick interval
pub struct SettlementWorker {
    engine: Arc<SettlementEngine>,
    tick_interval: Duration,
}

impl SettlementWorker {
    /// Create a new SettlementWorker
    pub fn new(engine: SettlementEngine, tick_interval_ms: u64) -> Self {
        Self {
            engine: Arc::new(engine),
            tick_interval: Duration::from_millis(tick_interval_ms),
        }
    }

    /// Build a worker from configuration
    ///
    /// Returns `None` when no shard index is configured: this process does
    /// not settle. A malformed assignment also disables settlement, loudly.
    pub fn from_config(
        config: &AppConfig,
        transactions: TransactionRepository,
    ) -> Option<SettlementWorker> {
        let index = match config.settlement.shard_index {
            Some(index) => index,
            None => {
                logging::log_info("No shard index configured; settlement disabled");
                return None;
            }
        };

        match ShardAssignment::new(index, config.settlement.shard_count) {
            Ok(assignment) => {
                logging::log_info(&format!(
                    "Settlement worker assigned shard {}/{}",
                    assignment.index(),
                    assignment.count()
                ));
                Some(SettlementWorker::new(
                    SettlementEngine::new(transactions, assignment),
                    config.settlement.tick_interval_ms,
                ))
            }
            Err(msg) => {
                logging::log_error(&format!("Invalid shard assignment: {}", msg));
                None
            }
        }
    }

    /// Spawn the worker loop
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.tick_interval);

            loop {
                interval.tick().await;

                match self.engine.tick().await {
                    Ok(summary) => {
                        if summary.settled > 0 || summary.failed_accounts > 0 {
                            logging::log_info(&format!(
                                "Settled {} transactions ({} canceled) across {} accounts, pruned {} shard keys, {} accounts deferred",
                                summary.settled,
                                summary.canceled,
                                summary.accounts,
                                summary.pruned,
                                summary.failed_accounts
                            ));
                        }
                    }
                    Err(e) => {
                        // The gather failed; nothing was touched, retry
                        // on the next tick
                        logging::log_error(&format!("Settlement tick aborted: {}", e));
                    }
                }
            }
        })
    }
}
