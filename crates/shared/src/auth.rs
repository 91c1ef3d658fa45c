//! Authentication types for JWT and tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// User's role (`user` or `admin`).
    pub role: String,
    /// Agency the user belongs to, if assigned.
    pub agency: Option<Uuid>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        role: &str,
        agency_id: Option<Uuid>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role: role.to_string(),
            agency: agency_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the agency ID from claims, if any.
    #[must_use]
    pub const fn agency_id(&self) -> Option<Uuid> {
        self.agency
    }

    /// Returns true if the claims carry the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// User email.
    pub email: String,
    /// User password.
    pub password: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Authenticated user info.
    pub user: UserInfo,
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Token expiration in seconds.
    pub expires_in: i64,
}

/// User info returned in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: Uuid,
    /// User email.
    pub email: String,
    /// User role (`user` or `admin`).
    pub role: String,
    /// Agency the user belongs to, if assigned.
    pub agency: Option<AgencyInfo>,
}

/// Agency info embedded in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct AgencyInfo {
    /// Agency ID.
    pub id: Uuid,
    /// Agency name.
    pub name: String,
}

/// Refresh token request.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    /// The refresh token.
    pub refresh_token: String,
}

/// Logout request.
#[derive(Debug, Clone, Deserialize)]
pub struct LogoutRequest {
    /// The refresh token to invalidate.
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_accessors() {
        let user_id = Uuid::new_v4();
        let agency_id = Uuid::new_v4();
        let claims = Claims::new(
            user_id,
            "admin",
            Some(agency_id),
            Utc::now() + chrono::Duration::minutes(15),
        );

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.agency_id(), Some(agency_id));
        assert!(claims.is_admin());
    }

    #[test]
    fn test_claims_non_admin() {
        let claims = Claims::new(Uuid::new_v4(), "user", None, Utc::now());
        assert!(!claims.is_admin());
        assert_eq!(claims.agency_id(), None);
    }
}
