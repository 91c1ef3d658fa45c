//! Creator record repository for database operations.
//!
//! Records are written once per upload batch and only deleted as a
//! whole `(period, agency_id)` batch.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::creator_records;
use glint_core::record::CreatorRecord;

/// One uploaded batch: all records sharing a `(period, agency_id)` pair.
#[derive(Debug, Clone, FromQueryResult)]
pub struct BatchSummary {
    /// Period label of the batch.
    pub period: String,
    /// Agency owning the batch.
    pub agency_id: Uuid,
    /// Number of records in the batch.
    pub row_count: i64,
    /// Most recent insert time in the batch.
    pub latest_at: chrono::DateTime<chrono::FixedOffset>,
}

/// Creator record repository.
#[derive(Debug, Clone)]
pub struct CreatorRecordRepository {
    db: DatabaseConnection,
}

impl CreatorRecordRepository {
    /// Creates a new creator record repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a batch of records in one statement. Returns the number
    /// of rows inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn insert_batch(&self, records: Vec<CreatorRecord>) -> Result<u64, DbErr> {
        if records.is_empty() {
            return Ok(0);
        }

        let now: chrono::DateTime<chrono::FixedOffset> = chrono::Utc::now().into();
        let count = records.len() as u64;

        let models = records.into_iter().map(|r| creator_records::ActiveModel {
            id: Set(Uuid::new_v4()),
            period: Set(r.period),
            agency_id: Set(r.agency_id),
            creator_id: Set(r.creator_id),
            creator_username: Set(r.creator_username),
            group_name: Set(r.group_name),
            agent: Set(r.agent),
            days_joined: Set(r.days_joined),
            diamonds: Set(r.diamonds),
            last_month_diamonds: Set(r.last_month_diamonds),
            new_followers: Set(r.new_followers),
            live_hours: Set(r.live_hours),
            live_days: Set(r.live_days),
            created_at: Set(now),
        });

        creator_records::Entity::insert_many(models)
            .exec(&self.db)
            .await?;

        Ok(count)
    }

    /// Loads records sorted by diamonds descending, optionally scoped
    /// to one agency.
    ///
    /// The descending sort is the ordering contract the aggregation
    /// engine relies on; it is established here and nowhere else.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_sorted(
        &self,
        agency_id: Option<Uuid>,
    ) -> Result<Vec<creator_records::Model>, DbErr> {
        let mut query =
            creator_records::Entity::find().order_by_desc(creator_records::Column::Diamonds);

        if let Some(agency_id) = agency_id {
            query = query.filter(creator_records::Column::AgencyId.eq(agency_id));
        }

        query.all(&self.db).await
    }

    /// Lists uploaded batches grouped by `(period, agency_id)` with row
    /// counts, newest upload first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_batches(&self) -> Result<Vec<BatchSummary>, DbErr> {
        creator_records::Entity::find()
            .select_only()
            .column(creator_records::Column::Period)
            .column(creator_records::Column::AgencyId)
            .column_as(Expr::col(creator_records::Column::Id).count(), "row_count")
            .column_as(
                Expr::col(creator_records::Column::CreatedAt).max(),
                "latest_at",
            )
            .group_by(creator_records::Column::Period)
            .group_by(creator_records::Column::AgencyId)
            .order_by_desc(Expr::col(creator_records::Column::CreatedAt).max())
            .into_model::<BatchSummary>()
            .all(&self.db)
            .await
    }

    /// Deletes one batch. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_batch(&self, period: &str, agency_id: Uuid) -> Result<u64, DbErr> {
        let result = creator_records::Entity::delete_many()
            .filter(creator_records::Column::Period.eq(period))
            .filter(creator_records::Column::AgencyId.eq(agency_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes all records owned by an agency.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_by_agency(&self, agency_id: Uuid) -> Result<u64, DbErr> {
        let result = creator_records::Entity::delete_many()
            .filter(creator_records::Column::AgencyId.eq(agency_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
