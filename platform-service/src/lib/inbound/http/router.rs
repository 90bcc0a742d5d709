use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::RouteGuard;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::cookies::CookieSettings;
use super::handlers::analytics::analytics;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::pages;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::middleware::authenticate;
use super::middleware::require_admin;
use super::route_guard::guard_pages;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::InMemoryUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<InMemoryUserRepository>>,
    pub authenticator: Arc<Authenticator>,
    pub route_guard: Arc<RouteGuard>,
    pub cookies: CookieSettings,
}

pub fn create_router(
    user_service: Arc<UserService<InMemoryUserRepository>>,
    authenticator: Arc<Authenticator>,
    cookies: CookieSettings,
) -> Router {
    let route_guard = Arc::new(RouteGuard::new(authenticator.verifier().clone()));
    let state = AppState {
        user_service,
        authenticator,
        route_guard,
        cookies,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/logout", post(logout));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(me))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Layers run bottom-up: authenticate first, then the admin check.
    let admin_routes = Router::new()
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/analytics", get(analytics))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let page_routes = Router::new()
        .route("/", get(pages::landing))
        .route("/dashboard", get(pages::dashboard))
        .route("/dashboard/*rest", get(pages::dashboard))
        .route("/profile", get(pages::profile))
        .route("/profile/*rest", get(pages::profile))
        .route("/admin", get(pages::admin))
        .route("/admin/*rest", get(pages::admin))
        .route("/auth/login", get(pages::login_page))
        .route("/auth/register", get(pages::register_page));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .merge(page_routes)
        .layer(middleware::from_fn_with_state(state.clone(), guard_pages))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
