//! Ordered cascade deletion for agencies.
//!
//! Deleting an agency removes dependent data first: creator records,
//! then users assigned to the agency, then the agency row. The three
//! deletions are sequential independent statements with no transaction
//! around them; on failure the cascade stops and reports which step
//! failed. Steps that already committed are not rolled back.

use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use super::{AgencyRepository, CreatorRecordRepository, UserRepository};

/// One step of the agency cascade, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStep {
    /// Delete the agency's creator records.
    Records,
    /// Delete users assigned to the agency.
    Users,
    /// Delete the agency row itself.
    Agency,
}

impl std::fmt::Display for CascadeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Records => write!(f, "creator records"),
            Self::Users => write!(f, "users"),
            Self::Agency => write!(f, "agency"),
        }
    }
}

/// A cascade failure carrying the step that failed.
#[derive(Debug, Error)]
#[error("agency cascade failed while deleting {step}: {source}")]
pub struct CascadeError {
    /// The step that failed. Earlier steps have already committed.
    pub step: CascadeStep,
    /// The underlying database error.
    #[source]
    pub source: DbErr,
}

/// Row counts removed by a completed cascade.
#[derive(Debug, Clone, Copy, Default)]
pub struct CascadeReport {
    /// Creator records removed.
    pub records_deleted: u64,
    /// Users removed.
    pub users_deleted: u64,
}

/// Deletes an agency and everything referencing it, in dependency order.
///
/// # Errors
///
/// Returns a [`CascadeError`] naming the failing step; deletions from
/// earlier steps remain committed.
pub async fn delete_agency_cascade(
    db: &DatabaseConnection,
    agency_id: Uuid,
) -> Result<CascadeReport, CascadeError> {
    let records_deleted = CreatorRecordRepository::new(db.clone())
        .delete_by_agency(agency_id)
        .await
        .map_err(|source| CascadeError {
            step: CascadeStep::Records,
            source,
        })?;

    let users_deleted = UserRepository::new(db.clone())
        .delete_by_agency(agency_id)
        .await
        .map_err(|source| CascadeError {
            step: CascadeStep::Users,
            source,
        })?;

    AgencyRepository::new(db.clone())
        .delete(agency_id)
        .await
        .map_err(|source| CascadeError {
            step: CascadeStep::Agency,
            source,
        })?;

    info!(
        agency_id = %agency_id,
        records_deleted,
        users_deleted,
        "Agency cascade complete"
    );

    Ok(CascadeReport {
        records_deleted,
        users_deleted,
    })
}
