//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod agency;
pub mod cascade;
pub mod creator_record;
pub mod session;
pub mod user;

pub use agency::AgencyRepository;
pub use cascade::{CascadeError, CascadeReport, CascadeStep, delete_agency_cascade};
pub use creator_record::{BatchSummary, CreatorRecordRepository};
pub use session::SessionRepository;
pub use user::UserRepository;
