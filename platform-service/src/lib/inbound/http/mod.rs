pub mod cookies;
pub mod handlers;
pub mod middleware;
pub mod route_guard;
pub mod router;
