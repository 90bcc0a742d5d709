use auth::extract_token;
use auth::Role;
use auth::Subscription;
use auth::ACCESS_TOKEN_COOKIE;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
    pub subscription: Subscription,
}

/// Token from the session cookie or the Authorization header, cookie first.
pub fn request_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    let cookie = jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value());
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    extract_token(cookie, authorization).map(str::to_string)
}

/// Middleware that validates access tokens for API routes and adds the
/// caller to request extensions.
///
/// Unlike the page guard, failures answer with JSON 401 rather than a
/// redirect.
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request_token(&jar, req.headers())
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    let claims = state.authenticator.verify_access(&token).map_err(|e| {
        tracing::debug!(reason = %e.cause(), "Access token rejected");
        ApiError::Unauthorized(e.to_string())
    })?;

    let user_id = UserId::from_string(&claims.user_id).map_err(|e| {
        tracing::warn!(error = %e, "Access token carries a malformed user id");
        ApiError::Unauthorized("Invalid token".to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
        role: claims.role,
        subscription: claims.subscription,
    });

    Ok(next.run(req).await)
}

/// Middleware that admits only admins. Runs after [`authenticate`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    match req.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.role.is_admin() => Ok(next.run(req).await),
        Some(user) => {
            tracing::info!(user_id = %user.user_id, "Admin access denied");
            Err(ApiError::Forbidden("Admin access required".to_string()))
        }
        None => Err(ApiError::Unauthorized(
            "Authentication required".to_string(),
        )),
    }
}
