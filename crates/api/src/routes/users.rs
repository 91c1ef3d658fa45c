//! Admin user-profile management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::middleware::{AuthUser, require_admin};
use crate::routes::auth::role_to_string;
use crate::{AppState, error_response};
use glint_db::UserRepository;
use glint_db::entities::sea_orm_active_enums::UserRole;
use glint_shared::AppError;

/// Creates the user management routes (requires auth middleware to be
/// applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{user_id}", patch(update_user))
        .route("/users/{user_id}", delete(delete_user))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for updating a user.
///
/// `agency_id` distinguishes "leave unchanged" (absent) from "clear the
/// assignment" (explicit null).
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    /// New role (optional).
    pub role: Option<String>,
    /// New agency assignment (optional, null to clear).
    #[serde(default)]
    pub agency_id: Option<Option<Uuid>>,
}

/// Response for one user profile.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// User email.
    pub email: String,
    /// User role.
    pub role: String,
    /// Assigned agency ID, if any.
    pub agency_id: Option<Uuid>,
    /// Assigned agency name, if any.
    pub agency_name: Option<String>,
    /// Whether the account can sign in.
    pub is_active: bool,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /users - List all profiles with agency expansion (admin only).
async fn list_users(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.list_with_agencies().await {
        Ok(users) => {
            let response: Vec<UserResponse> = users
                .into_iter()
                .map(|(user, agency)| UserResponse {
                    id: user.id,
                    email: user.email,
                    role: role_to_string(&user.role),
                    agency_id: user.agency_id,
                    agency_name: agency.map(|a| a.name),
                    is_active: user.is_active,
                })
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list users");
            error_response(&AppError::Database(e.to_string())).into_response()
        }
    }
}

/// PATCH /users/{user_id} - Update role and/or agency (admin only).
async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.find_by_id(user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return error_response(&AppError::NotFound("user does not exist".to_string()))
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Failed to load user");
            return error_response(&AppError::Database(e.to_string())).into_response();
        }
    }

    if let Some(role_str) = &payload.role {
        let role = match role_str.as_str() {
            "user" => UserRole::User,
            "admin" => UserRole::Admin,
            other => {
                return error_response(&AppError::Validation(format!(
                    "unknown role \"{other}\""
                )))
                .into_response();
            }
        };

        if let Err(e) = user_repo.update_role(user_id, role).await {
            error!(error = %e, "Failed to update user role");
            return error_response(&AppError::Database(e.to_string())).into_response();
        }
    }

    if let Some(agency_id) = payload.agency_id {
        if let Err(e) = user_repo.update_agency(user_id, agency_id).await {
            error!(error = %e, "Failed to update user agency");
            return error_response(&AppError::Database(e.to_string())).into_response();
        }
    }

    info!(user_id = %user_id, "User profile updated");

    (StatusCode::OK, Json(json!({ "updated": true }))).into_response()
}

/// DELETE /users/{user_id} - Delete a profile (admin only).
async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.delete(user_id).await {
        Ok(true) => {
            info!(user_id = %user_id, "User deleted");
            (StatusCode::OK, Json(json!({ "deleted": true }))).into_response()
        }
        Ok(false) => error_response(&AppError::NotFound("user does not exist".to_string()))
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to delete user");
            error_response(&AppError::Database(e.to_string())).into_response()
        }
    }
}
