use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use thiserror::Error;

use super::login::SessionResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::DisplayNameError;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> Result<(CookieJar, ApiSuccess<SessionResponseData>), ApiError> {
    let session = state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    let jar = state.cookies.store_session(jar, &session.tokens);
    Ok((jar, ApiSuccess::new(StatusCode::CREATED, session.into())))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("All fields are required")]
    MissingField,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Invalid name: {0}")]
    Name(#[from] DisplayNameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let fields = [&self.name, &self.email, &self.password, &self.confirm_password];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(ParseRegisterRequestError::MissingField);
        }
        if self.password != self.confirm_password {
            return Err(ParseRegisterRequestError::PasswordMismatch);
        }

        let password = Password::new(self.password)?;
        let email = EmailAddress::new(self.email.trim().to_string())?;
        let name = DisplayName::new(self.name)?;
        Ok(RegisterCommand::new(name, email, password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        match err {
            ParseRegisterRequestError::MissingField
            | ParseRegisterRequestError::PasswordMismatch
            | ParseRegisterRequestError::Password(_) => ApiError::BadRequest(err.to_string()),
            ParseRegisterRequestError::Name(_) | ParseRegisterRequestError::Email(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
        }
    }
}
