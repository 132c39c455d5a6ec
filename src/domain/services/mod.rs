pub mod credential_hasher;
pub mod credential_service;
pub mod deposit_service;
pub mod sharding;

pub use credential_service::{CredentialError, CredentialService, SanitizedCredentials};
pub use deposit_service::{DepositService, IngestedDeposit};
pub use sharding::{shard_key, ShardAssignment, ShardRange};
