//! Settlement worker daemon
//!
//! Runs one settlement worker pinned to the shard configured via
//! `SETTLEMENT_SHARD_INDEX` / `SETTLEMENT_SHARD_COUNT`. With no shard
//! index configured the process idles; ingestion and credential calls
//! arrive through the library API from the surrounding service.
//!
//! ```bash
//! SETTLEMENT_SHARD_INDEX=0 SETTLEMENT_SHARD_COUNT=4 cargo run --release
//! ```

use custody_core::application::settlement::SettlementWorker;
use custody_core::config::AppConfig;
use custody_core::infrastructure::persistence::{DbPool, RepositoryFactory};
use custody_core::utils::logging;

#[tokio::main]
async fn main() {
    logging::init_logger();

    let config = AppConfig::from_env();

    let db_pool = match DbPool::new(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            logging::log_error(&format!("Failed to connect to database: {}", e));
            return;
        }
    };

    let repositories = RepositoryFactory::create_repositories(&db_pool);

    let worker = SettlementWorker::from_config(&config, repositories.transaction.clone());

    let handle = worker.map(|w| w.spawn());

    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");

    logging::log_info("Shutting down...");
    if let Some(handle) = handle {
        handle.abort();
    }
}
