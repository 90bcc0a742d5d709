use std::env;
use std::fmt;

use auth::SecretError;
use auth::SigningSecrets;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for platform-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
    #[serde(default)]
    pub cookies: CookieConfig,
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing secrets. No defaults: both must be supplied.
#[derive(Deserialize, Clone, Default)]
pub struct JwtConfig {
    #[serde(default)]
    pub access_secret: Option<String>,
    #[serde(default)]
    pub refresh_secret: Option<String>,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |s: &Option<String>| s.as_ref().map(|_| "<redacted>");
        f.debug_struct("JwtConfig")
            .field("access_secret", &redact(&self.access_secret))
            .field("refresh_secret", &redact(&self.refresh_secret))
            .finish()
    }
}

/// Session cookie attributes.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CookieConfig {
    #[serde(default)]
    pub secure: bool,
}

/// Admin account created at startup when its email is not registered yet.
#[derive(Deserialize, Clone)]
pub struct BootstrapAdminConfig {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl fmt::Debug for BootstrapAdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapAdminConfig")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (JWT__ACCESS_SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Returns error if configuration values are malformed
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__ACCESS_SECRET=... overrides jwt.access_secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }

    /// Validated signing secrets.
    ///
    /// # Errors
    /// Any `SecretError` is a missing-configuration failure and must abort
    /// startup.
    pub fn signing_secrets(&self) -> Result<SigningSecrets, SecretError> {
        SigningSecrets::new(
            self.jwt.access_secret.as_deref(),
            self.jwt.refresh_secret.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(access: Option<&str>, refresh: Option<&str>) -> Config {
        Config {
            server: ServerConfig { http_port: 3000 },
            jwt: JwtConfig {
                access_secret: access.map(str::to_string),
                refresh_secret: refresh.map(str::to_string),
            },
            cookies: CookieConfig::default(),
            bootstrap_admin: None,
        }
    }

    #[test]
    fn test_signing_secrets_required() {
        let result = config(None, None).signing_secrets();
        assert_eq!(result.unwrap_err(), SecretError::Missing("jwt.access_secret"));
    }

    #[test]
    fn test_signing_secrets_valid() {
        let result = config(
            Some("access_secret_key_at_least_32_bytes!"),
            Some("refresh_secret_key_at_least_32_bytes"),
        )
        .signing_secrets();
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_reads_secrets_from_environment() {
        env::set_var("JWT__ACCESS_SECRET", "env_access_secret_at_least_32_bytes!");
        env::set_var("JWT__REFRESH_SECRET", "env_refresh_secret_at_least_32_bytes");

        let config = Config::load().unwrap();

        env::remove_var("JWT__ACCESS_SECRET");
        env::remove_var("JWT__REFRESH_SECRET");

        assert_eq!(
            config.jwt.access_secret.as_deref(),
            Some("env_access_secret_at_least_32_bytes!")
        );
        assert_eq!(
            config.jwt.refresh_secret.as_deref(),
            Some("env_refresh_secret_at_least_32_bytes")
        );
        assert_eq!(config.server.http_port, 3000);
        assert!(config.signing_secrets().is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = config(Some("visible-access-secret"), Some("visible-refresh-secret"));
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("visible-access-secret"));
        assert!(!rendered.contains("visible-refresh-secret"));
    }
}
