//! Agency repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::agencies;

/// Agency repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AgencyRepository {
    db: DatabaseConnection,
}

impl AgencyRepository {
    /// Creates a new agency repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all agencies ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<agencies::Model>, DbErr> {
        agencies::Entity::find()
            .order_by_asc(agencies::Column::Name)
            .all(&self.db)
            .await
    }

    /// Finds an agency by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<agencies::Model>, DbErr> {
        agencies::Entity::find_by_id(id).one(&self.db).await
    }

    /// Checks if an agency name is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn name_exists(&self, name: &str) -> Result<bool, DbErr> {
        let count = agencies::Entity::find()
            .filter(agencies::Column::Name.eq(name))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new agency.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, name: &str) -> Result<agencies::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let agency = agencies::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        agency.insert(&self.db).await
    }

    /// Deletes the agency row itself.
    ///
    /// Dependent rows are NOT touched here; use
    /// [`crate::repositories::delete_agency_cascade`] for the full
    /// ordered cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = agencies::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
