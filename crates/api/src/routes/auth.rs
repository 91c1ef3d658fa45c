//! Authentication routes for login, token refresh, logout, and identity.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::USER_AGENT},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser};
use glint_db::entities::sea_orm_active_enums::UserRole;
use glint_db::{AgencyRepository, SessionRepository, UserRepository};
use glint_shared::auth::{
    AgencyInfo, LoginRequest, LoginResponse, LogoutRequest, RefreshRequest, UserInfo,
};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
}

/// Creates the auth routes that require an authenticated caller.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

/// POST /auth/login - Authenticate user and return tokens.
#[allow(clippy::too_many_lines)]
async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    // Find user by email
    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for non-existent user");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_credentials",
                    "message": "Invalid email or password"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error("An error occurred during login");
        }
    };

    // Check if user is active
    if !user.is_active {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "account_disabled",
                "message": "This account has been disabled"
            })),
        )
            .into_response();
    }

    // Verify password
    match glint_core::auth::verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_credentials",
                    "message": "Invalid email or password"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error("An error occurred during login");
        }
    }

    // Generate tokens
    let role_str = role_to_string(&user.role);
    let access_token =
        match state
            .jwt_service
            .generate_access_token(user.id, &role_str, user.agency_id)
        {
            Ok(t) => t,
            Err(e) => {
                error!(error = %e, "Failed to generate access token");
                return internal_error("An error occurred during login");
            }
        };

    let refresh_token =
        match state
            .jwt_service
            .generate_refresh_token(user.id, &role_str, user.agency_id)
        {
            Ok(t) => t,
            Err(e) => {
                error!(error = %e, "Failed to generate refresh token");
                return internal_error("An error occurred during login");
            }
        };

    // Record the session so logout can invalidate the refresh token
    let session_repo = SessionRepository::new((*state.db).clone());
    let expires_at = chrono::Utc::now()
        + chrono::Duration::days(state.jwt_service.refresh_token_expires_days());
    let user_agent = headers.get(USER_AGENT).and_then(|h| h.to_str().ok());

    if let Err(e) = session_repo
        .create(user.id, &refresh_token, expires_at, user_agent)
        .await
    {
        error!(error = %e, "Failed to create session");
        return internal_error("An error occurred during login");
    }

    // Expand the agency for the response
    let agency = match user.agency_id {
        Some(agency_id) => {
            match AgencyRepository::new((*state.db).clone())
                .find_by_id(agency_id)
                .await
            {
                Ok(a) => a.map(|a| AgencyInfo {
                    id: a.id,
                    name: a.name,
                }),
                Err(e) => {
                    error!(error = %e, "Failed to load user's agency");
                    return internal_error("An error occurred during login");
                }
            }
        }
        None => None,
    };

    info!(user_id = %user.id, "User logged in successfully");

    let response = LoginResponse {
        user: UserInfo {
            id: user.id,
            email: user.email,
            role: role_str,
            agency,
        },
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// POST /auth/refresh - Refresh access token using refresh token.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    // Validate refresh token
    let claims = match state.jwt_service.validate_token(&payload.refresh_token) {
        Ok(c) => c,
        Err(e) => {
            let (error, message) = match e {
                glint_shared::JwtError::Expired => ("token_expired", "Refresh token has expired"),
                _ => ("invalid_token", "Invalid refresh token"),
            };
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response();
        }
    };

    // The session must still exist and be unrevoked
    let session_repo = SessionRepository::new((*state.db).clone());
    match session_repo.find_by_token(&payload.refresh_token).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_token",
                    "message": "Session has been revoked"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during token refresh");
            return internal_error("An error occurred during token refresh");
        }
    }

    // Generate new access token
    let access_token = match state.jwt_service.generate_access_token(
        claims.user_id(),
        &claims.role,
        claims.agency_id(),
    ) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error("An error occurred during token refresh");
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "access_token": access_token,
            "expires_in": state.jwt_service.access_token_expires_in()
        })),
    )
        .into_response()
}

/// POST /auth/logout - Revoke the session for a refresh token.
async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<LogoutRequest>,
) -> impl IntoResponse {
    let session_repo = SessionRepository::new((*state.db).clone());

    match session_repo.revoke_by_token(&payload.refresh_token).await {
        Ok(revoked) => {
            // Revoking an unknown token is not an error; logout is idempotent
            (StatusCode::OK, Json(json!({ "revoked": revoked }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Database error during logout");
            internal_error("An error occurred during logout")
        }
    }
}

/// GET /auth/me - Current user with agency expansion.
async fn me(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.find_with_agency(auth.user_id()).await {
        Ok(Some((user, agency))) => {
            let response = UserInfo {
                id: user.id,
                email: user.email,
                role: role_to_string(&user.role),
                agency: agency.map(|a| AgencyInfo {
                    id: a.id,
                    name: a.name,
                }),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "User no longer exists"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading current user");
            internal_error("An error occurred loading the current user")
        }
    }
}

/// Converts `UserRole` enum to string.
pub(crate) fn role_to_string(role: &UserRole) -> String {
    match role {
        UserRole::User => "user".to_string(),
        UserRole::Admin => "admin".to_string(),
    }
}

fn internal_error(message: &str) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": message
        })),
    )
        .into_response()
}
