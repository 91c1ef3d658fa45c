//! `SeaORM` active enums mapped to database enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role within the application.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    /// Regular agency user; sees only their own agency's data.
    #[sea_orm(string_value = "user")]
    User,
    /// Administrator; sees all agencies and manages uploads.
    #[sea_orm(string_value = "admin")]
    Admin,
}
