use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::models::Deposit;
use crate::infrastructure::persistence::entities::deposits;
use crate::infrastructure::persistence::error::DbError;

/// Repository for deposit operations
#[derive(Clone)]
pub struct DepositRepository {
    conn: DatabaseConnection,
}

impl DepositRepository {
    /// Create a new DepositRepository
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a new deposit
    ///
    /// The id is the originating blockchain transaction id; a replayed
    /// deposit fails here with a unique violation, which ingestion treats
    /// as "seen before" rather than an error.
    pub async fn create(
        &self,
        id: &str,
        account_id: &str,
        transaction_id: &str,
        height: i64,
    ) -> Result<Deposit, DbError> {
        let model = deposits::ActiveModel {
            id: Set(id.to_string()),
            account_id: Set(account_id.to_string()),
            transaction_id: Set(transaction_id.to_string()),
            height: Set(height),
            created_date: Set(Utc::now().into()),
        };

        let inserted = model.insert(&self.conn).await?;

        Ok(Self::to_domain_model(inserted))
    }

    /// Get a deposit by its ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Deposit>, DbError> {
        let result = deposits::Entity::find_by_id(id).one(&self.conn).await?;

        Ok(result.map(Self::to_domain_model))
    }

    /// Convert a database entity to a domain model
    fn to_domain_model(entity: deposits::Model) -> Deposit {
        Deposit {
            id: entity.id,
            account_id: entity.account_id,
            transaction_id: entity.transaction_id,
            height: entity.height,
            created_date: entity.created_date.with_timezone(&Utc),
        }
    }
}
