use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::login::SessionResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::cookies::REFRESH_TOKEN_COOKIE;
use crate::inbound::http::router::AppState;

/// Exchange a refresh token for a new token pair.
///
/// The token is read from the JSON body first, then from the refresh
/// cookie.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshRequest>>,
) -> Result<(CookieJar, ApiSuccess<SessionResponseData>), ApiError> {
    let token = body
        .and_then(|Json(body)| body.refresh_token)
        .filter(|token| !token.is_empty())
        .or_else(|| {
            jar.get(REFRESH_TOKEN_COOKIE)
                .map(|cookie| cookie.value().to_string())
                .filter(|token| !token.is_empty())
        })
        .ok_or_else(|| ApiError::Unauthorized("Refresh token required".to_string()))?;

    let session = state
        .user_service
        .refresh(&token)
        .await
        .map_err(ApiError::from)?;

    let jar = state.cookies.store_session(jar, &session.tokens);
    Ok((jar, ApiSuccess::new(StatusCode::OK, session.into())))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    refresh_token: Option<String>,
}
