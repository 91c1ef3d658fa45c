//! Agency management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::middleware::{AuthUser, require_admin};
use crate::{AppState, error_response};
use glint_db::AgencyRepository;
use glint_db::repositories::delete_agency_cascade;
use glint_shared::AppError;

/// Creates the agency routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/agencies", get(list_agencies))
        .route("/agencies", post(create_agency))
        .route("/agencies/{agency_id}", delete(delete_agency))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating an agency.
#[derive(Debug, Deserialize)]
pub struct CreateAgencyRequest {
    /// Agency name.
    pub name: String,
}

/// Response for one agency.
#[derive(Debug, Serialize)]
pub struct AgencyResponse {
    /// Agency ID.
    pub id: Uuid,
    /// Agency name.
    pub name: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /agencies - List all agencies, name-ordered.
///
/// Available to every authenticated user; the dashboard upload form
/// needs the list for its agency dropdown.
async fn list_agencies(State(state): State<AppState>, _auth: AuthUser) -> impl IntoResponse {
    let agency_repo = AgencyRepository::new((*state.db).clone());

    match agency_repo.list_all().await {
        Ok(agencies) => {
            let response: Vec<AgencyResponse> = agencies
                .into_iter()
                .map(|a| AgencyResponse {
                    id: a.id,
                    name: a.name,
                })
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list agencies");
            error_response(&AppError::Database(e.to_string())).into_response()
        }
    }
}

/// POST /agencies - Create an agency (admin only).
async fn create_agency(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAgencyRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    // Pre-call validation: never attempt the insert with a blank name
    let name = payload.name.trim();
    if name.is_empty() {
        return error_response(&AppError::Validation(
            "agency name must not be empty".to_string(),
        ))
        .into_response();
    }

    let agency_repo = AgencyRepository::new((*state.db).clone());

    match agency_repo.name_exists(name).await {
        Ok(true) => {
            return error_response(&AppError::Conflict(format!(
                "an agency named \"{name}\" already exists"
            )))
            .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Failed to check agency name");
            return error_response(&AppError::Database(e.to_string())).into_response();
        }
    }

    match agency_repo.create(name).await {
        Ok(agency) => {
            info!(agency_id = %agency.id, name = %agency.name, "Agency created");
            (
                StatusCode::CREATED,
                Json(AgencyResponse {
                    id: agency.id,
                    name: agency.name,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create agency");
            error_response(&AppError::Database(e.to_string())).into_response()
        }
    }
}

/// DELETE /agencies/{agency_id} - Delete an agency and everything
/// referencing it (admin only).
///
/// Dependent data goes first: creator records, then users, then the
/// agency row. A mid-cascade failure reports which step failed; earlier
/// steps remain committed.
async fn delete_agency(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(agency_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let agency_repo = AgencyRepository::new((*state.db).clone());

    match agency_repo.find_by_id(agency_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return error_response(&AppError::NotFound("agency does not exist".to_string()))
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Failed to load agency");
            return error_response(&AppError::Database(e.to_string())).into_response();
        }
    }

    match delete_agency_cascade(&state.db, agency_id).await {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({
                "records_deleted": report.records_deleted,
                "users_deleted": report.users_deleted
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, step = %e.step, "Agency cascade failed");
            error_response(&AppError::Database(e.to_string())).into_response()
        }
    }
}
