//! `SeaORM` Entity for creator_records table.
//!
//! Rows are written once by upload and only ever deleted as a
//! `(period, agency_id)` batch; the primary key is storage identity
//! only and is never addressed by the API.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use glint_core::record::CreatorRecord;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "creator_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub period: String,
    pub agency_id: Uuid,
    pub creator_id: String,
    pub creator_username: String,
    pub group_name: String,
    pub agent: String,
    pub days_joined: i64,
    pub diamonds: i64,
    pub last_month_diamonds: i64,
    pub new_followers: i64,
    pub live_hours: String,
    pub live_days: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::agencies::Entity",
        from = "Column::AgencyId",
        to = "super::agencies::Column::Id"
    )]
    Agencies,
}

impl Related<super::agencies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Agencies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Converts the stored row into the canonical in-memory record.
    #[must_use]
    pub fn into_record(self) -> CreatorRecord {
        CreatorRecord {
            period: self.period,
            agency_id: self.agency_id,
            creator_id: self.creator_id,
            creator_username: self.creator_username,
            group_name: self.group_name,
            agent: self.agent,
            days_joined: self.days_joined,
            diamonds: self.diamonds,
            last_month_diamonds: self.last_month_diamonds,
            new_followers: self.new_followers,
            live_hours: self.live_hours,
            live_days: self.live_days,
        }
    }
}
