use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Clear the session cookies. Tokens are stateless, so nothing is revoked
/// server-side.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, ApiSuccess<LogoutResponseData>) {
    (
        state.cookies.clear_session(jar),
        ApiSuccess::new(
            StatusCode::OK,
            LogoutResponseData {
                message: "Logged out".to_string(),
            },
        ),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
