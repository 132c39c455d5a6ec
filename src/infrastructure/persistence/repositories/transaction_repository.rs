use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::models::{Transaction, TransactionKind};
use crate::infrastructure::persistence::entities::transactions;
use crate::infrastructure::persistence::error::DbError;

/// Repository for ledger transaction operations
#[derive(Clone)]
pub struct TransactionRepository {
    conn: DatabaseConnection,
}

impl TransactionRepository {
    /// Create a new TransactionRepository
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a new unsettled transaction
    ///
    /// Every row is born with its account's shard key; a transaction
    /// created without one would never be picked up by any settlement
    /// worker.
    pub async fn create(
        &self,
        id: &str,
        account_id: &str,
        kind: TransactionKind,
        amount: &str,
        settlement_shard_key: &str,
    ) -> Result<Transaction, DbError> {
        let model = transactions::ActiveModel {
            id: Set(id.to_string()),
            account_id: Set(account_id.to_string()),
            kind: Set(kind.as_str().to_string()),
            amount: Set(amount.to_string()),
            created_date: Set(Utc::now().into()),
            settled: Set(false),
            settled_date: Set(None),
            balance: Set(None),
            canceled: Set(false),
            settlement_shard_key: Set(Some(settlement_shard_key.to_string())),
        };

        let inserted = model.insert(&self.conn).await?;

        Self::to_domain_model(inserted)
    }

    /// Get a transaction by its ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Transaction>, DbError> {
        let result = transactions::Entity::find_by_id(id).one(&self.conn).await?;

        result.map(Self::to_domain_model).transpose()
    }

    /// Find all transactions for an account in fold order
    pub async fn find_by_account_id(&self, account_id: &str) -> Result<Vec<Transaction>, DbError> {
        let results = transactions::Entity::find()
            .filter(transactions::Column::AccountId.eq(account_id))
            .order_by_asc(transactions::Column::CreatedDate)
            .order_by_asc(transactions::Column::Id)
            .all(&self.conn)
            .await?;

        results.into_iter().map(Self::to_domain_model).collect()
    }

    /// Range-scan transactions whose shard key falls in `[start, end)`,
    /// in fold order (created date ascending, id as tiebreak)
    ///
    /// `end = None` means the range is unbounded above (the last shard).
    pub async fn find_by_shard_key_range(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<Vec<Transaction>, DbError> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::SettlementShardKey.gte(start));

        if let Some(end) = end {
            query = query.filter(transactions::Column::SettlementShardKey.lt(end));
        }

        let results = query
            .order_by_asc(transactions::Column::CreatedDate)
            .order_by_asc(transactions::Column::Id)
            .all(&self.conn)
            .await?;

        results.into_iter().map(Self::to_domain_model).collect()
    }

    /// Write the settlement outcome for one transaction
    ///
    /// Sends the explicit field set only; the row object gathered during
    /// the scan is never echoed back to the store.
    pub async fn apply_settlement(
        &self,
        id: &str,
        balance: &str,
        canceled: bool,
    ) -> Result<(), DbError> {
        let result = transactions::Entity::update_many()
            .col_expr(transactions::Column::Settled, Expr::value(true))
            .col_expr(
                transactions::Column::SettledDate,
                Expr::value(Some(sea_orm::prelude::DateTimeWithTimeZone::from(
                    Utc::now(),
                ))),
            )
            .col_expr(
                transactions::Column::Balance,
                Expr::value(Some(balance.to_string())),
            )
            .col_expr(transactions::Column::Canceled, Expr::value(canceled))
            .filter(transactions::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(DbError::Other(format!(
                "settlement update matched no transaction {}",
                id
            )));
        }

        Ok(())
    }

    /// Mark a transaction settled without computing a balance
    ///
    /// Returns the number of rows updated so the caller can distinguish
    /// "no such transaction" from success.
    pub async fn mark_settled(&self, id: &str) -> Result<u64, DbError> {
        let result = transactions::Entity::update_many()
            .col_expr(transactions::Column::Settled, Expr::value(true))
            .col_expr(
                transactions::Column::SettledDate,
                Expr::value(Some(sea_orm::prelude::DateTimeWithTimeZone::from(
                    Utc::now(),
                ))),
            )
            .filter(transactions::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    /// Clear the shard key field on a settled transaction
    ///
    /// Field-scoped delete; the row itself stays.
    pub async fn clear_shard_key(&self, id: &str) -> Result<(), DbError> {
        transactions::Entity::update_many()
            .col_expr(
                transactions::Column::SettlementShardKey,
                Expr::value(None::<String>),
            )
            .filter(transactions::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    /// Convert a database entity to a domain model
    fn to_domain_model(entity: transactions::Model) -> Result<Transaction, DbError> {
        let kind = entity
            .kind
            .parse::<TransactionKind>()
            .map_err(DbError::Other)?;

        Ok(Transaction {
            id: entity.id,
            account_id: entity.account_id,
            kind,
            amount: entity.amount,
            created_date: entity.created_date.with_timezone(&Utc),
            settled: entity.settled,
            settled_date: entity.settled_date.map(|d| d.with_timezone(&Utc)),
            balance: entity.balance,
            canceled: entity.canceled,
            settlement_shard_key: entity.settlement_shard_key,
        })
    }
}
