use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::me::ProfileData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::ListUsersQuery;
use crate::domain::user::models::UserPage;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Admin listing of accounts with paging and search.
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListUsersParams>,
) -> Result<ApiSuccess<ListUsersResponseData>, ApiError> {
    let query = ListUsersQuery::new(params.page, params.limit, params.search);

    state
        .user_service
        .list_users(query)
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.into()))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersParams {
    page: Option<usize>,
    limit: Option<usize>,
    search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListUsersResponseData {
    pub users: Vec<ProfileData>,
    pub pagination: PaginationData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationData {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

impl From<UserPage> for ListUsersResponseData {
    fn from(page: UserPage) -> Self {
        Self {
            users: page.users.iter().map(ProfileData::from).collect(),
            pagination: PaginationData {
                total: page.total,
                page: page.page,
                limit: page.limit,
                total_pages: page.total_pages,
            },
        }
    }
}
