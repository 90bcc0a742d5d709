use std::fmt;

use thiserror::Error;

/// Values shipped as placeholders by earlier deployments. Never accepted.
const INSECURE_SECRETS: &[&str] = &[
    "fallback-secret-key",
    "fallback-refresh-key",
    "your-jwt-secret",
    "your-refresh-token-secret",
    "secret",
    "changeme",
];

/// Signing configuration errors. All of them are fatal at startup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Missing configuration: {0} is not set")]
    Missing(&'static str),

    #[error("Missing configuration: {name} must be at least {min} bytes, got {actual}")]
    TooShort {
        name: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("Missing configuration: {0} uses a known insecure placeholder value")]
    Insecure(&'static str),

    #[error("Missing configuration: access and refresh secrets must differ")]
    Reused,
}

/// Validated pair of HMAC signing secrets.
///
/// The access and refresh secrets are always distinct, so the signing
/// material of one token kind never forges the other.
#[derive(Clone)]
pub struct SigningSecrets {
    access: Vec<u8>,
    refresh: Vec<u8>,
}

impl SigningSecrets {
    /// Minimum secret length for HS256.
    pub const MIN_LENGTH: usize = 32;

    /// Validate a pair of secrets.
    ///
    /// # Errors
    /// * `Missing` - A secret is absent or empty
    /// * `TooShort` - A secret is shorter than 32 bytes
    /// * `Insecure` - A secret matches a known placeholder
    /// * `Reused` - Both secrets are identical
    pub fn new(access: Option<&str>, refresh: Option<&str>) -> Result<Self, SecretError> {
        let access = Self::validate("jwt.access_secret", access)?;
        let refresh = Self::validate("jwt.refresh_secret", refresh)?;

        if access == refresh {
            return Err(SecretError::Reused);
        }

        Ok(Self {
            access: access.as_bytes().to_vec(),
            refresh: refresh.as_bytes().to_vec(),
        })
    }

    fn validate<'a>(name: &'static str, value: Option<&'a str>) -> Result<&'a str, SecretError> {
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(SecretError::Missing(name))?;

        if INSECURE_SECRETS.contains(&value) {
            return Err(SecretError::Insecure(name));
        }

        if value.len() < Self::MIN_LENGTH {
            return Err(SecretError::TooShort {
                name,
                min: Self::MIN_LENGTH,
                actual: value.len(),
            });
        }

        Ok(value)
    }

    pub fn access(&self) -> &[u8] {
        &self.access
    }

    pub fn refresh(&self) -> &[u8] {
        &self.refresh
    }
}

impl fmt::Debug for SigningSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecrets")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}
