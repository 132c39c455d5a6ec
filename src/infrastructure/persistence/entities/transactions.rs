//! Ledger transaction entity for SeaORM

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub account_id: String,
    pub kind: String,
    /// Non-negative amount as a canonical decimal string
    pub amount: String,
    pub created_date: DateTimeWithTimeZone,
    pub settled: bool,
    pub settled_date: Option<DateTimeWithTimeZone>,
    /// Running balance after this transaction; meaningful only when settled
    pub balance: Option<String>,
    pub canceled: bool,
    /// Present while a settlement shard still needs this row; cleared for
    /// all but the newest settled transaction of each account
    pub settlement_shard_key: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
