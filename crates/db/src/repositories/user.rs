//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::{agencies, sea_orm_active_enums::UserRole, users};

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a user by ID with their agency expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_with_agency(
        &self,
        id: Uuid,
    ) -> Result<Option<(users::Model, Option<agencies::Model>)>, DbErr> {
        users::Entity::find_by_id(id)
            .find_also_related(agencies::Entity)
            .one(&self.db)
            .await
    }

    /// Lists all users with their agencies expanded, email-ordered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_with_agencies(
        &self,
    ) -> Result<Vec<(users::Model, Option<agencies::Model>)>, DbErr> {
        users::Entity::find()
            .find_also_related(agencies::Entity)
            .order_by_asc(users::Column::Email)
            .all(&self.db)
            .await
    }

    /// Updates a user's role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_role(&self, id: Uuid, role: UserRole) -> Result<users::Model, DbErr> {
        users::ActiveModel {
            id: Set(id),
            role: Set(role),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
    }

    /// Updates a user's agency assignment. `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_agency(
        &self,
        id: Uuid,
        agency_id: Option<Uuid>,
    ) -> Result<users::Model, DbErr> {
        users::ActiveModel {
            id: Set(id),
            agency_id: Set(agency_id),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
    }

    /// Deletes a user by ID. Returns true if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = users::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    /// Deletes all users assigned to an agency.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_by_agency(&self, agency_id: Uuid) -> Result<u64, DbErr> {
        let result = users::Entity::delete_many()
            .filter(users::Column::AgencyId.eq(agency_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
