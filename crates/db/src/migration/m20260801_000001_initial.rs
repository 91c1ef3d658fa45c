//! Initial database migration.
//!
//! Creates the core enums, tables, indexes, and the updated_at trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CORE TABLES
        // ============================================================
        db.execute_unprepared(AGENCIES_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(SESSIONS_SQL).await?;

        // ============================================================
        // PART 3: CREATOR DATA
        // ============================================================
        db.execute_unprepared(CREATOR_RECORDS_SQL).await?;

        // ============================================================
        // PART 4: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- User roles
CREATE TYPE user_role AS ENUM (
    'user',
    'admin'
);
";

const AGENCIES_SQL: &str = r"
CREATE TABLE agencies (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role user_role NOT NULL DEFAULT 'user',
    agency_id UUID REFERENCES agencies(id),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_users_email ON users(email);
CREATE INDEX idx_users_agency ON users(agency_id);
";

const SESSIONS_SQL: &str = r"
CREATE TABLE sessions (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    refresh_token_hash TEXT NOT NULL,
    user_agent TEXT,
    expires_at TIMESTAMPTZ NOT NULL,
    revoked_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_sessions_user ON sessions(user_id);
CREATE INDEX idx_sessions_token ON sessions(refresh_token_hash);
";

const CREATOR_RECORDS_SQL: &str = r"
CREATE TABLE creator_records (
    id UUID PRIMARY KEY,
    period TEXT NOT NULL,
    agency_id UUID NOT NULL REFERENCES agencies(id),
    creator_id TEXT NOT NULL DEFAULT '',
    creator_username TEXT NOT NULL DEFAULT '',
    group_name TEXT NOT NULL DEFAULT '',
    agent TEXT NOT NULL DEFAULT '',
    days_joined BIGINT NOT NULL DEFAULT 0,
    diamonds BIGINT NOT NULL DEFAULT 0,
    last_month_diamonds BIGINT NOT NULL DEFAULT 0,
    new_followers BIGINT NOT NULL DEFAULT 0,
    live_hours TEXT NOT NULL DEFAULT '',
    live_days BIGINT NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_creator_records_agency ON creator_records(agency_id);
CREATE INDEX idx_creator_records_batch ON creator_records(period, agency_id);
CREATE INDEX idx_creator_records_diamonds ON creator_records(diamonds DESC);
";

const TRIGGERS_SQL: &str = r"
-- Keep updated_at current on row updates
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_agencies_updated_at
    BEFORE UPDATE ON agencies
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_users_updated_at
    BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_sessions_updated_at
    BEFORE UPDATE ON sessions
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS creator_records;
DROP TABLE IF EXISTS sessions;
DROP TABLE IF EXISTS users;
DROP TABLE IF EXISTS agencies;
DROP TYPE IF EXISTS user_role;
DROP FUNCTION IF EXISTS set_updated_at();
";
