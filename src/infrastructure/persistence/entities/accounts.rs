//! Account entity for SeaORM

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub password_salt: String,
    pub active: bool,
    pub created_date: DateTimeWithTimeZone,
    #[sea_orm(unique)]
    pub deposit_wallet_address: String,
    pub deposit_wallet_passphrase: String,
    pub deposit_wallet_private_key: String,
    pub deposit_wallet_public_key: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
