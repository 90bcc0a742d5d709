use auth::TokenPair;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Log in with email and password.
///
/// Sets the session cookies and returns the token pair in the body for
/// clients that prefer bearer headers.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<SessionResponseData>), ApiError> {
    let session = state
        .user_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    let jar = state.cookies.store_session(jar, &session.tokens);
    Ok((jar, ApiSuccess::new(StatusCode::OK, session.into())))
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ApiError::BadRequest(
                "Email and password are required".to_string(),
            ));
        }

        Ok(LoginCommand {
            email: self.email.trim().to_string(),
            password: self.password,
        })
    }
}

/// Response body shared by login, registration and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub user: UserData,
    pub tokens: TokenPair,
}

impl From<AuthSession> for SessionResponseData {
    fn from(session: AuthSession) -> Self {
        Self {
            user: UserData::from(&session.user),
            tokens: session.tokens,
        }
    }
}
