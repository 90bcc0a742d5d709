//! Request-time route authorization.
//!
//! Framework-agnostic: callers hand in the path and the raw cookie/header
//! values, and get back a [`GuardDecision`] to translate into a response.

pub mod policy;
pub mod routes;

pub use policy::extract_token;
pub use policy::GuardDecision;
pub use policy::RouteGuard;
pub use policy::ACCESS_TOKEN_COOKIE;
pub use routes::RouteKind;
pub use routes::RouteTable;
