use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::principal::Principal;
use crate::principal::Role;
use crate::principal::Subscription;

/// Claims that carry an expiry the verifier must enforce.
pub trait TokenClaims {
    /// Expiration time (Unix timestamp, seconds).
    fn expires_at(&self) -> i64;

    /// A token is valid strictly before its expiry.
    fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.expires_at()
    }
}

/// Short-lived access token payload.
///
/// Carries the full authorization facts checked on every request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub subscription: Subscription,
    pub iat: i64,
    pub exp: i64,
}

impl AccessClaims {
    pub const LIFETIME_MINUTES: i64 = 15;

    /// Build access claims for a principal, expiring 15 minutes after `issued_at`.
    pub fn for_principal(principal: &Principal, issued_at: DateTime<Utc>) -> Self {
        let expiration = issued_at + Duration::minutes(Self::LIFETIME_MINUTES);

        Self {
            user_id: principal.user_id.clone(),
            email: principal.email.clone(),
            role: principal.role,
            subscription: principal.subscription,
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl TokenClaims for AccessClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}

/// Long-lived refresh token payload. Identity only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshClaims {
    pub user_id: String,
    pub iat: i64,
    pub exp: i64,
}

impl RefreshClaims {
    pub const LIFETIME_DAYS: i64 = 7;

    pub fn for_principal(principal: &Principal, issued_at: DateTime<Utc>) -> Self {
        let expiration = issued_at + Duration::days(Self::LIFETIME_DAYS);

        Self {
            user_id: principal.user_id.clone(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}

impl TokenClaims for RefreshClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}
