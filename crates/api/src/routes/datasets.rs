//! Uploaded-batch management routes.
//!
//! A batch is every record sharing one `(period, agency_id)` pair; it
//! is the atomic unit of deletion. No route addresses a single record.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::{error, info};
use uuid::Uuid;

use crate::middleware::{AuthUser, require_admin};
use crate::{AppState, error_response};
use glint_db::{AgencyRepository, CreatorRecordRepository};
use glint_shared::AppError;

/// Creates the dataset routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/datasets", get(list_datasets))
        .route("/datasets/{agency_id}/{period}", delete(delete_dataset))
}

/// Response for one uploaded batch.
#[derive(Debug, Serialize)]
pub struct DatasetResponse {
    /// Period label.
    pub period: String,
    /// Agency owning the batch.
    pub agency_id: Uuid,
    /// Agency name, when the agency still exists.
    pub agency_name: Option<String>,
    /// Number of records in the batch.
    pub row_count: i64,
    /// Most recent insert time in the batch (RFC 3339).
    pub latest_upload_at: String,
}

/// GET /datasets - List uploaded batches, newest first (admin only).
async fn list_datasets(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let record_repo = CreatorRecordRepository::new((*state.db).clone());
    let batches = match record_repo.list_batches().await {
        Ok(b) => b,
        Err(e) => {
            error!(error = %e, "Failed to list upload batches");
            return error_response(&AppError::Database(e.to_string())).into_response();
        }
    };

    // Expand agency names in one pass rather than per batch
    let agency_repo = AgencyRepository::new((*state.db).clone());
    let agencies = match agency_repo.list_all().await {
        Ok(a) => a,
        Err(e) => {
            error!(error = %e, "Failed to list agencies");
            return error_response(&AppError::Database(e.to_string())).into_response();
        }
    };
    let names: HashMap<Uuid, String> = agencies.into_iter().map(|a| (a.id, a.name)).collect();

    let response: Vec<DatasetResponse> = batches
        .into_iter()
        .map(|b| DatasetResponse {
            agency_name: names.get(&b.agency_id).cloned(),
            period: b.period,
            agency_id: b.agency_id,
            row_count: b.row_count,
            latest_upload_at: b.latest_at.to_rfc3339(),
        })
        .collect();

    (StatusCode::OK, Json(response)).into_response()
}

/// DELETE /datasets/{agency_id}/{period} - Delete one batch (admin only).
async fn delete_dataset(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((agency_id, period)): Path<(Uuid, String)>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let record_repo = CreatorRecordRepository::new((*state.db).clone());

    match record_repo.delete_batch(&period, agency_id).await {
        Ok(0) => error_response(&AppError::NotFound(
            "no records match that period and agency".to_string(),
        ))
        .into_response(),
        Ok(deleted) => {
            info!(%agency_id, period = %period, deleted, "Upload batch deleted");
            (StatusCode::OK, Json(json!({ "deleted": deleted }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete upload batch");
            error_response(&AppError::Database(e.to_string())).into_response()
        }
    }
}
