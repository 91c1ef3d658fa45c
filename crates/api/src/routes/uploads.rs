//! Spreadsheet upload route.
//!
//! Accepts a multipart form with the batch context (`period`, `agency`)
//! and the workbook file, parses it, and appends the whole batch to the
//! store. An undecodable workbook aborts the upload with nothing
//! inserted; bad cells within rows are defaulted, never rejected.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::middleware::{AuthUser, require_admin};
use crate::{AppState, error_response};
use glint_core::ingest::parse_workbook;
use glint_db::{AgencyRepository, CreatorRecordRepository};
use glint_shared::AppError;

/// Creates the upload routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/uploads", post(upload_workbook))
}

/// Response for a completed upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Number of records inserted.
    pub inserted: u64,
    /// Rows that had at least one numeric cell defaulted to 0.
    pub rows_with_defaults: u64,
}

/// Collected multipart fields.
#[derive(Default)]
struct UploadForm {
    period: Option<String>,
    agency: Option<String>,
    file: Option<Vec<u8>>,
}

async fn read_form(multipart: &mut Multipart) -> Result<UploadForm, String> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("invalid multipart body: {e}"))?
    {
        match field.name() {
            Some("period") => {
                form.period = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| format!("invalid period field: {e}"))?,
                );
            }
            Some("agency") => {
                form.agency = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| format!("invalid agency field: {e}"))?,
                );
            }
            Some("file") => {
                form.file = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| format!("invalid file field: {e}"))?
                        .to_vec(),
                );
            }
            _ => {}
        }
    }

    Ok(form)
}

/// POST /uploads - Ingest a workbook as one batch (admin only).
#[axum::debug_handler]
async fn upload_workbook(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let form = match read_form(&mut multipart).await {
        Ok(f) => f,
        Err(message) => {
            return error_response(&AppError::Validation(message)).into_response();
        }
    };

    let Some(period) = form.period.map(|p| p.trim().to_string()).filter(|p| !p.is_empty())
    else {
        return error_response(&AppError::Validation(
            "period field is required".to_string(),
        ))
        .into_response();
    };
    let Some(agency_field) = form.agency else {
        return error_response(&AppError::Validation(
            "agency field is required".to_string(),
        ))
        .into_response();
    };
    let Some(file_bytes) = form.file else {
        return error_response(&AppError::Validation("file field is required".to_string()))
            .into_response();
    };

    let Ok(agency_id) = agency_field.trim().parse::<Uuid>() else {
        return error_response(&AppError::Validation(
            "agency field must be a UUID".to_string(),
        ))
        .into_response();
    };

    // The batch must reference an existing agency
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

    // Whole-file failure only; row-level bad data has already been
    // defaulted by the parser.
    let parsed = match parse_workbook(&file_bytes, &period, agency_id) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "Rejected undecodable upload");
            return error_response(&AppError::MalformedInput(e.to_string())).into_response();
        }
    };

    let rows_with_defaults = parsed
        .iter()
        .filter(|p| !p.defaulted_fields.is_empty())
        .count() as u64;

    let records = parsed.into_iter().map(|p| p.record).collect();

    let record_repo = CreatorRecordRepository::new((*state.db).clone());
    match record_repo.insert_batch(records).await {
        Ok(inserted) => {
            info!(
                %agency_id,
                period = %period,
                inserted,
                rows_with_defaults,
                "Upload batch stored"
            );
            (
                StatusCode::CREATED,
                Json(UploadResponse {
                    inserted,
                    rows_with_defaults,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to insert upload batch");
            error_response(&AppError::Database(e.to_string())).into_response()
        }
    }
}
