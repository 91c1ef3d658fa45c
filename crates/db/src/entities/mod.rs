//! `SeaORM` entity definitions.

pub mod agencies;
pub mod creator_records;
pub mod sea_orm_active_enums;
pub mod sessions;
pub mod users;
