use auth::TokenPair;
use auth::ACCESS_TOKEN_COOKIE;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;

/// Cookie holding the refresh token; only sent to the auth endpoints.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

const ACCESS_COOKIE_PATH: &str = "/";
const REFRESH_COOKIE_PATH: &str = "/api/auth";

/// Attributes for the session cookies set at login, registration and refresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieSettings {
    pub secure: bool,
}

impl CookieSettings {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    pub fn store_session(&self, jar: CookieJar, tokens: &TokenPair) -> CookieJar {
        jar.add(self.cookie(
            ACCESS_TOKEN_COOKIE,
            tokens.access_token.clone(),
            ACCESS_COOKIE_PATH,
        ))
        .add(self.cookie(
            REFRESH_TOKEN_COOKIE,
            tokens.refresh_token.clone(),
            REFRESH_COOKIE_PATH,
        ))
    }

    pub fn clear_session(&self, jar: CookieJar) -> CookieJar {
        jar.remove(self.cookie(ACCESS_TOKEN_COOKIE, String::new(), ACCESS_COOKIE_PATH))
            .remove(self.cookie(REFRESH_TOKEN_COOKIE, String::new(), REFRESH_COOKIE_PATH))
    }

    fn cookie(&self, name: &'static str, value: String, path: &'static str) -> Cookie<'static> {
        Cookie::build((name, value))
            .path(path)
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }
}
