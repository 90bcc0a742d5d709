use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::AdminStats;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Admin dashboard figures.
pub async fn analytics(
    State(state): State<AppState>,
) -> Result<ApiSuccess<AnalyticsResponseData>, ApiError> {
    state
        .user_service
        .stats()
        .await
        .map_err(ApiError::from)
        .map(|stats| ApiSuccess::new(StatusCode::OK, stats.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsResponseData {
    pub total_users: usize,
    pub total_usage: u64,
    pub users_by_subscription: SubscriptionCountsData,
    pub users_by_role: RoleCountsData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionCountsData {
    #[serde(rename = "Starter")]
    pub starter: usize,
    #[serde(rename = "Professional")]
    pub professional: usize,
    #[serde(rename = "Enterprise")]
    pub enterprise: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleCountsData {
    pub user: usize,
    pub admin: usize,
}

impl From<AdminStats> for AnalyticsResponseData {
    fn from(stats: AdminStats) -> Self {
        Self {
            total_users: stats.total_users,
            total_usage: stats.total_usage,
            users_by_subscription: SubscriptionCountsData {
                starter: stats.by_subscription.starter,
                professional: stats.by_subscription.professional,
                enterprise: stats.by_subscription.enterprise,
            },
            users_by_role: RoleCountsData {
                user: stats.by_role.user,
                admin: stats.by_role.admin,
            },
        }
    }
}
