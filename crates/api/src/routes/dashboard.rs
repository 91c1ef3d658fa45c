//! Dashboard routes.
//!
//! Fetches the caller-visible record snapshot, runs the aggregation
//! engine over it, and returns the view with display-formatted numbers
//! alongside the raw values.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::AuthUser};
use glint_core::analytics::{AnalyticsEngine, DashboardFilter, format_metric};
use glint_core::record::CreatorRecord;
use glint_db::CreatorRecordRepository;

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Period filter; absent or `all` means no period filter.
    pub period: Option<String>,
    /// Group filter; absent or `all` means no group filter.
    pub group: Option<String>,
}

/// Maps the wire-level `all` sentinel onto no filter.
fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "all")
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for the dashboard view.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Summary totals.
    pub summary: SummaryResponse,
    /// Selectable period options, first-seen order.
    pub periods: Vec<String>,
    /// Selectable group options, first-seen order.
    pub groups: Vec<String>,
    /// Per-group rollups, diamonds descending.
    pub group_rollups: Vec<GroupRollupResponse>,
    /// Creator listing, capped.
    pub creators: Vec<CreatorRowResponse>,
}

/// Summary totals with display strings.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Sum of diamonds.
    pub total_diamonds: i64,
    /// Display form of `total_diamonds`.
    pub total_diamonds_display: String,
    /// Number of records.
    pub total_creators: u64,
    /// Sum of new followers.
    pub total_followers: i64,
    /// Display form of `total_followers`.
    pub total_followers_display: String,
    /// Recently joined creators.
    pub new_creators: u64,
}

/// One group rollup row.
#[derive(Debug, Serialize)]
pub struct GroupRollupResponse {
    /// Group label.
    pub name: String,
    /// Sum of diamonds.
    pub diamonds: i64,
    /// Display form of `diamonds`.
    pub diamonds_display: String,
    /// Number of records.
    pub creators: u64,
}

/// One creator listing row.
#[derive(Debug, Serialize)]
pub struct CreatorRowResponse {
    /// External creator identifier.
    pub creator_id: String,
    /// Display handle.
    pub creator_username: String,
    /// Group label.
    pub group_name: String,
    /// Sub-agent label.
    pub agent: String,
    /// Diamonds metric.
    pub diamonds: i64,
    /// Display form of `diamonds`.
    pub diamonds_display: String,
    /// Followers gained.
    pub new_followers: i64,
    /// Display form of `new_followers`.
    pub new_followers_display: String,
    /// True if the creator joined recently.
    pub is_new: bool,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /dashboard?period=&group=
///
/// Admins see all agencies' records; regular users only their own
/// agency's. A user with no agency assignment sees an empty dashboard.
#[axum::debug_handler]
async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
    auth: AuthUser,
) -> impl IntoResponse {
    let scope = if auth.is_admin() {
        None
    } else {
        match auth.agency_id() {
            Some(agency_id) => Some(agency_id),
            None => {
                // No agency assigned: nothing visible, not an error.
                let view = AnalyticsEngine::aggregate(&[], &DashboardFilter::all());
                return (StatusCode::OK, Json(render(view))).into_response();
            }
        }
    };

    let record_repo = CreatorRecordRepository::new((*state.db).clone());

    let models = match record_repo.list_sorted(scope).await {
        Ok(m) => m,
        Err(e) => {
            error!(error = %e, "Failed to load creator records");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "Failed to load dashboard data"
                })),
            )
                .into_response();
        }
    };

    let records: Vec<CreatorRecord> = models.into_iter().map(|m| m.into_record()).collect();

    let filter = DashboardFilter {
        period: normalize(query.period),
        group: normalize(query.group),
    };

    let view = AnalyticsEngine::aggregate(&records, &filter);

    (StatusCode::OK, Json(render(view))).into_response()
}

/// Attaches display strings to the engine's numeric outputs.
fn render(view: glint_core::analytics::DashboardView) -> DashboardResponse {
    DashboardResponse {
        summary: SummaryResponse {
            total_diamonds: view.summary.total_diamonds,
            total_diamonds_display: format_metric(view.summary.total_diamonds),
            total_creators: view.summary.total_creators,
            total_followers: view.summary.total_followers,
            total_followers_display: format_metric(view.summary.total_followers),
            new_creators: view.summary.new_creators,
        },
        periods: view.periods,
        groups: view.groups,
        group_rollups: view
            .group_rollups
            .into_iter()
            .map(|r| GroupRollupResponse {
                diamonds_display: format_metric(r.diamonds),
                name: r.name,
                diamonds: r.diamonds,
                creators: r.creators,
            })
            .collect(),
        creators: view
            .creators
            .into_iter()
            .map(|c| CreatorRowResponse {
                diamonds_display: format_metric(c.diamonds),
                new_followers_display: format_metric(c.new_followers),
                creator_id: c.creator_id,
                creator_username: c.creator_username,
                group_name: c.group_name,
                agent: c.agent,
                diamonds: c.diamonds,
                new_followers: c.new_followers,
                is_new: c.is_new,
            })
            .collect(),
    }
}
