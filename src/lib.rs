//! Account and settlement core for the custody service
//!
//! Owns three coupled concerns: idempotent deposit ingestion from an
//! external blockchain observer, sharded batch settlement of the ledger,
//! and the account credential lifecycle (signup and login). Transport,
//! the blockchain observer itself, and the wallet generator are external
//! collaborators reached through the seams in `infrastructure`.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod utils;
