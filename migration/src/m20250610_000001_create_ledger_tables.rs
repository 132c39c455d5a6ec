use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if !manager.has_table("accounts").await? {
            // Create accounts table
            manager
                .create_table(
                    Table::create()
                        .table(Accounts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Accounts::Id)
                                .string()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Accounts::Username).string().not_null())
                        .col(ColumnDef::new(Accounts::Password).string().not_null())
                        .col(ColumnDef::new(Accounts::PasswordSalt).string().not_null())
                        .col(ColumnDef::new(Accounts::Active).boolean().not_null())
                        .col(
                            ColumnDef::new(Accounts::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Accounts::DepositWalletAddress)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Accounts::DepositWalletPassphrase)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Accounts::DepositWalletPrivateKey)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Accounts::DepositWalletPublicKey)
                                .string()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Username and deposit wallet address must both be unique;
            // signup relies on these indices to resolve concurrent inserts
            manager
                .create_index(
                    Index::create()
                        .name("accounts_username")
                        .table(Accounts::Table)
                        .col(Accounts::Username)
                        .unique()
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("accounts_deposit_wallet_address")
                        .table(Accounts::Table)
                        .col(Accounts::DepositWalletAddress)
                        .unique()
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        if !manager.has_table("deposits").await? {
            // Create deposits table; the primary key is the originating
            // blockchain transaction id, which makes replayed deposits
            // collide here instead of double-crediting
            manager
                .create_table(
                    Table::create()
                        .table(Deposits::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Deposits::Id)
                                .string()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Deposits::AccountId).string().not_null())
                        .col(ColumnDef::new(Deposits::TransactionId).string().not_null())
                        .col(ColumnDef::new(Deposits::Height).big_integer().not_null())
                        .col(
                            ColumnDef::new(Deposits::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("deposits_account_id")
                        .table(Deposits::Table)
                        .col(Deposits::AccountId)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        if !manager.has_table("transactions").await? {
            // Create transactions table
            manager
                .create_table(
                    Table::create()
                        .table(Transactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Transactions::Id)
                                .string()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Transactions::AccountId).string().not_null())
                        .col(ColumnDef::new(Transactions::Kind).string().not_null())
                        .col(ColumnDef::new(Transactions::Amount).string().not_null())
                        .col(
                            ColumnDef::new(Transactions::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Transactions::Settled)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Transactions::SettledDate).timestamp_with_time_zone())
                        .col(ColumnDef::new(Transactions::Balance).string())
                        .col(
                            ColumnDef::new(Transactions::Canceled)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Transactions::SettlementShardKey).string())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("transactions_account_id")
                        .table(Transactions::Table)
                        .col(Transactions::AccountId)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;

            // Settlement workers range-scan this index every tick
            manager
                .create_index(
                    Index::create()
                        .name("transactions_settlement_shard_key")
                        .table(Transactions::Table)
                        .col(Transactions::SettlementShardKey)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Deposits::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Accounts table
#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    Username,
    Password,
    PasswordSalt,
    Active,
    CreatedDate,
    DepositWalletAddress,
    DepositWalletPassphrase,
    DepositWalletPrivateKey,
    DepositWalletPublicKey,
}

// Deposits table
#[derive(Iden)]
enum Deposits {
    Table,
    Id,
    AccountId,
    TransactionId,
    Height,
    CreatedDate,
}

// Transactions table
#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    AccountId,
    Kind,
    Amount,
    CreatedDate,
    Settled,
    SettledDate,
    Balance,
    Canceled,
    SettlementShardKey,
}
