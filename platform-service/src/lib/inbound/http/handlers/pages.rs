//! Placeholder pages. Rendering is out of scope for this service; these
//! exist so the route guard has real page routes to protect.

use axum::response::Html;

fn page(title: &str) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><title>{title}</title></head><body><h1>{title}</h1></body></html>"
    ))
}

pub async fn landing() -> Html<String> {
    page("Welcome")
}

pub async fn dashboard() -> Html<String> {
    page("Dashboard")
}

pub async fn profile() -> Html<String> {
    page("Profile")
}

pub async fn admin() -> Html<String> {
    page("Admin")
}

pub async fn login_page() -> Html<String> {
    page("Log in")
}

pub async fn register_page() -> Html<String> {
    page("Create account")
}
