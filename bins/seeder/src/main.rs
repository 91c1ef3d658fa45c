//! Database seeder for Glint development and testing.
//!
//! Seeds an admin account, a demo agency with one regular user, and a
//! small batch of creator records so the dashboard has something to
//! show locally.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use glint_core::auth::hash_password;
use glint_db::entities::{agencies, creator_records, sea_orm_active_enums::UserRole, users};

/// Demo agency ID (consistent for all seeds)
const DEMO_AGENCY_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Admin user ID (consistent for all seeds)
const ADMIN_USER_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Demo user ID (consistent for all seeds)
const DEMO_USER_ID: &str = "00000000-0000-0000-0000-000000000003";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = glint_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo agency...");
    seed_demo_agency(&db).await;

    println!("Seeding admin user...");
    seed_admin_user(&db).await;

    println!("Seeding demo user...");
    seed_demo_user(&db).await;

    println!("Seeding creator records...");
    seed_creator_records(&db).await;

    println!("Seeding complete!");
}

fn demo_agency_id() -> Uuid {
    Uuid::parse_str(DEMO_AGENCY_ID).unwrap()
}

fn admin_user_id() -> Uuid {
    Uuid::parse_str(ADMIN_USER_ID).unwrap()
}

fn demo_user_id() -> Uuid {
    Uuid::parse_str(DEMO_USER_ID).unwrap()
}

/// Seeds the demo agency.
async fn seed_demo_agency(db: &DatabaseConnection) {
    if agencies::Entity::find_by_id(demo_agency_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo agency already exists, skipping...");
        return;
    }

    let agency = agencies::ActiveModel {
        id: Set(demo_agency_id()),
        name: Set("Nova".to_string()),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = agency.insert(db).await {
        eprintln!("Failed to insert demo agency: {e}");
    } else {
        println!("  Created demo agency: Nova");
    }
}

/// Seeds the admin account.
async fn seed_admin_user(db: &DatabaseConnection) {
    if users::Entity::find_by_id(admin_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Admin user already exists, skipping...");
        return;
    }

    let password_hash = hash_password("admin1234").expect("Failed to hash seed password");

    let user = users::ActiveModel {
        id: Set(admin_user_id()),
        email: Set("admin@glint.dev".to_string()),
        password_hash: Set(password_hash),
        role: Set(UserRole::Admin),
        agency_id: Set(None),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert admin user: {e}");
    } else {
        println!("  Created admin user: admin@glint.dev / admin1234");
    }
}

/// Seeds a regular user assigned to the demo agency.
async fn seed_demo_user(db: &DatabaseConnection) {
    if users::Entity::find_by_id(demo_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo user already exists, skipping...");
        return;
    }

    let password_hash = hash_password("user1234").expect("Failed to hash seed password");

    let user = users::ActiveModel {
        id: Set(demo_user_id()),
        email: Set("user@glint.dev".to_string()),
        password_hash: Set(password_hash),
        role: Set(UserRole::User),
        agency_id: Set(Some(demo_agency_id())),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert demo user: {e}");
    } else {
        println!("  Created demo user: user@glint.dev / user1234");
    }
}

/// Seeds one batch of creator records for the demo agency.
async fn seed_creator_records(db: &DatabaseConnection) {
    let existing = creator_records::Entity::find().one(db).await.ok().flatten();
    if existing.is_some() {
        println!("  Creator records already exist, skipping...");
        return;
    }

    let rows: [(&str, &str, &str, i64, i64, i64, i64, i64); 5] = [
        ("1001", "star_one", "A팀", 210, 3_200_000, 2_900_000, 1_200, 24),
        ("1002", "nova_girl", "A팀", 25, 1_500_000, 800_000, 4_400, 18),
        ("1003", "moonlight", "B팀", 400, 950_000, 1_100_000, 600, 22),
        ("1004", "fresh_face", "B팀", 12, 410_000, 0, 2_800, 9),
        ("1005", "quiet_one", "", 95, 120_000, 90_000, 150, 11),
    ];

    for (creator_id, username, group, days, diamonds, last_month, followers, live_days) in rows {
        let record = creator_records::ActiveModel {
            id: Set(Uuid::new_v4()),
            period: Set("12월1주".to_string()),
            agency_id: Set(demo_agency_id()),
            creator_id: Set(creator_id.to_string()),
            creator_username: Set(username.to_string()),
            group_name: Set(group.to_string()),
            agent: Set("demo-agent".to_string()),
            days_joined: Set(days),
            diamonds: Set(diamonds),
            last_month_diamonds: Set(last_month),
            new_followers: Set(followers),
            live_hours: Set("12:00".to_string()),
            live_days: Set(live_days),
            created_at: Set(Utc::now().into()),
        };

        if let Err(e) = record.insert(db).await {
            eprintln!("Failed to insert creator record: {e}");
        }
    }

    println!("  Created 5 creator records for Nova / 12월1주");
}
