use std::fmt::Write;

use chrono::DateTime;
use chrono::Utc;

use super::routes::RouteKind;
use super::routes::RouteTable;
use crate::jwt::TokenVerifier;

/// Cookie holding the access token for browser sessions.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

const BEARER_PREFIX: &str = "Bearer ";

/// Outcome of the guard for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    PassThrough,
    /// Redirect to the contained location (path plus optional query).
    Redirect(String),
}

impl GuardDecision {
    pub fn is_pass_through(&self) -> bool {
        matches!(self, GuardDecision::PassThrough)
    }
}

/// Pick the candidate token for a request.
///
/// The cookie wins; the `Authorization: Bearer` header is the fallback.
/// Empty values count as absent.
pub fn extract_token<'a>(cookie: Option<&'a str>, authorization: Option<&'a str>) -> Option<&'a str> {
    cookie.map(str::trim).filter(|t| !t.is_empty()).or_else(|| {
        authorization
            .and_then(|header| header.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|t| !t.is_empty())
    })
}

/// Route guard.
///
/// Stateless: each decision depends only on the path, the candidate token
/// and the current time. It never fails; every input resolves to a
/// pass-through or a redirect.
#[derive(Clone)]
pub struct RouteGuard {
    routes: RouteTable,
    verifier: TokenVerifier,
    login_path: String,
    landing_path: String,
}

impl RouteGuard {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self {
            routes: RouteTable::platform(),
            verifier,
            login_path: "/auth/login".to_string(),
            landing_path: "/dashboard".to_string(),
        }
    }

    pub fn decide(&self, path: &str, token: Option<&str>) -> GuardDecision {
        self.decide_at(path, token, Utc::now())
    }

    /// Decide as of `now`.
    pub fn decide_at(&self, path: &str, token: Option<&str>, now: DateTime<Utc>) -> GuardDecision {
        let kind = self.routes.classify(path);
        if kind == RouteKind::Public {
            return GuardDecision::PassThrough;
        }

        let verified = token.map(|t| self.verifier.verify_access_at(t, now));

        match verified {
            None if kind.requires_authentication() => self.login_redirect(path),
            Some(Err(e)) if kind.requires_authentication() => {
                tracing::debug!(path, reason = %e.cause(), "Rejected access token");
                self.login_redirect(path)
            }
            Some(Ok(claims)) if kind == RouteKind::Admin && !claims.is_admin() => {
                tracing::debug!(path, user_id = %claims.user_id, "Non-admin on admin route");
                GuardDecision::Redirect(self.landing_path.clone())
            }
            Some(Ok(_)) if kind == RouteKind::AuthOnly => {
                GuardDecision::Redirect(self.landing_path.clone())
            }
            Some(Err(e)) => {
                tracing::debug!(path, reason = %e.cause(), "Ignoring invalid token on auth route");
                GuardDecision::PassThrough
            }
            _ => GuardDecision::PassThrough,
        }
    }

    fn login_redirect(&self, path: &str) -> GuardDecision {
        GuardDecision::Redirect(format!(
            "{}?redirect={}",
            self.login_path,
            encode_return_path(path)
        ))
    }
}

/// Percent-encode a path for use as a query value. `/` stays literal.
fn encode_return_path(path: &str) -> String {
    path.bytes().fold(String::with_capacity(path.len()), |mut out, byte| {
        if byte.is_ascii_alphanumeric() || b"-._~/:@!$'()*,;".contains(&byte) {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{:02X}", byte);
        }
        out
    })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::jwt::TokenIssuer;
    use crate::principal::Principal;
    use crate::principal::Role;
    use crate::principal::Subscription;
    use crate::secrets::SigningSecrets;

    struct Fixture {
        guard: RouteGuard,
        issuer: TokenIssuer,
    }

    impl Fixture {
        fn new() -> Self {
            let secrets = SigningSecrets::new(
                Some("access_secret_key_at_least_32_bytes!"),
                Some("refresh_secret_key_at_least_32_bytes"),
            )
            .unwrap();
            Self {
                guard: RouteGuard::new(TokenVerifier::new(&secrets)),
                issuer: TokenIssuer::new(&secrets),
            }
        }

        fn access_token(&self, role: Role) -> String {
            self.issuer
                .issue(&Principal::new("u1", "u1@example.com", role, Subscription::Starter))
                .unwrap()
                .access_token
        }
    }

    fn redirect(location: &str) -> GuardDecision {
        GuardDecision::Redirect(location.to_string())
    }

    #[test]
    fn test_protected_without_token_redirects_to_login() {
        let f = Fixture::new();
        assert_eq!(
            f.guard.decide("/dashboard", None),
            redirect("/auth/login?redirect=/dashboard")
        );
    }

    #[test]
    fn test_protected_with_valid_token_passes() {
        let f = Fixture::new();
        let token = f.access_token(Role::User);
        assert!(f.guard.decide("/dashboard/usage", Some(&token)).is_pass_through());
        assert!(f.guard.decide("/profile", Some(&token)).is_pass_through());
    }

    #[test]
    fn test_protected_with_garbage_token_redirects_to_login() {
        let f = Fixture::new();
        assert_eq!(
            f.guard.decide("/dashboard", Some("not-a-token")),
            redirect("/auth/login?redirect=/dashboard")
        );
    }

    #[test]
    fn test_profile_with_expired_token_redirects_to_login() {
        let f = Fixture::new();
        let issued = Utc::now() - Duration::minutes(16);
        let token = f
            .issuer
            .issue_at(
                &Principal::new("u1", "u1@example.com", Role::User, Subscription::Starter),
                issued,
            )
            .unwrap()
            .access_token;

        assert_eq!(
            f.guard.decide("/profile", Some(&token)),
            redirect("/auth/login?redirect=/profile")
        );
    }

    #[test]
    fn test_admin_route_with_user_token_redirects_to_dashboard() {
        let f = Fixture::new();
        let token = f.access_token(Role::User);
        assert_eq!(f.guard.decide("/admin/users", Some(&token)), redirect("/dashboard"));
    }

    #[test]
    fn test_admin_route_with_admin_token_passes() {
        let f = Fixture::new();
        let token = f.access_token(Role::Admin);
        assert!(f.guard.decide("/admin/users", Some(&token)).is_pass_through());
    }

    #[test]
    fn test_admin_route_without_token_redirects_to_login() {
        let f = Fixture::new();
        assert_eq!(
            f.guard.decide("/admin/users", None),
            redirect("/auth/login?redirect=/admin/users")
        );
    }

    #[test]
    fn test_auth_route_with_valid_token_redirects_to_dashboard() {
        let f = Fixture::new();
        let token = f.access_token(Role::User);
        assert_eq!(f.guard.decide("/auth/login", Some(&token)), redirect("/dashboard"));
        assert_eq!(f.guard.decide("/auth/register", Some(&token)), redirect("/dashboard"));
    }

    #[test]
    fn test_auth_route_without_valid_token_passes() {
        let f = Fixture::new();
        assert!(f.guard.decide("/auth/login", None).is_pass_through());
        assert!(f.guard.decide("/auth/login", Some("expired.or.bad")).is_pass_through());
    }

    #[test]
    fn test_public_route_always_passes() {
        let f = Fixture::new();
        assert!(f.guard.decide("/", None).is_pass_through());
        assert!(f.guard.decide("/", Some("garbage")).is_pass_through());
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let f = Fixture::new();
        let refresh = f
            .issuer
            .issue(&Principal::new("u1", "u1@example.com", Role::Admin, Subscription::Starter))
            .unwrap()
            .refresh_token;

        assert_eq!(
            f.guard.decide("/dashboard", Some(&refresh)),
            redirect("/auth/login?redirect=/dashboard")
        );
    }

    #[test]
    fn test_return_path_is_query_safe() {
        let f = Fixture::new();
        assert_eq!(
            f.guard.decide("/dashboard/a b&c#d", None),
            redirect("/auth/login?redirect=/dashboard/a%20b%26c%23d")
        );
    }

    #[test]
    fn test_extract_token_prefers_cookie() {
        assert_eq!(extract_token(Some("cookie"), Some("Bearer header")), Some("cookie"));
        assert_eq!(extract_token(None, Some("Bearer header")), Some("header"));
        assert_eq!(extract_token(Some(""), Some("Bearer header")), Some("header"));
    }

    #[test]
    fn test_extract_token_requires_bearer_scheme() {
        assert_eq!(extract_token(None, Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_token(None, Some("Bearer ")), None);
        assert_eq!(extract_token(None, Some("raw.token.value")), None);
        assert_eq!(extract_token(None, None), None);
    }
}
