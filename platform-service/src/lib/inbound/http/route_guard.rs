use auth::GuardDecision;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use super::middleware::request_token;
use crate::inbound::http::router::AppState;

/// Page route guard.
///
/// Runs the guard decision for every request and turns a redirect decision
/// into a 307 with a `Location` header.
pub async fn guard_pages(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let token = request_token(&jar, req.headers());
    let decision = state
        .route_guard
        .decide(req.uri().path(), token.as_deref());

    match decision {
        GuardDecision::PassThrough => next.run(req).await,
        GuardDecision::Redirect(location) => {
            tracing::info!(
                path = %req.uri().path(),
                location = %location,
                "Route guard redirect"
            );
            Redirect::temporary(&location).into_response()
        }
    }
}
