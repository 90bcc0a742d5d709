use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::claims::AccessClaims;
use super::claims::RefreshClaims;
use super::errors::JwtError;
use super::handler::JwtHandler;
use crate::principal::Principal;
use crate::secrets::SigningSecrets;

/// Access/refresh token pair handed to a client at login, registration
/// and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Token issuer.
///
/// Signs access tokens with the access secret and refresh tokens with the
/// refresh secret.
#[derive(Clone)]
pub struct TokenIssuer {
    access: JwtHandler,
    refresh: JwtHandler,
}

impl TokenIssuer {
    pub fn new(secrets: &SigningSecrets) -> Self {
        Self {
            access: JwtHandler::new(secrets.access()),
            refresh: JwtHandler::new(secrets.refresh()),
        }
    }

    /// Issue a token pair for a principal as of now.
    pub fn issue(&self, principal: &Principal) -> Result<TokenPair, JwtError> {
        self.issue_at(principal, Utc::now())
    }

    /// Issue a token pair as of `now`.
    ///
    /// The output is fully determined by the principal, `now` and the
    /// secrets.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be signed
    pub fn issue_at(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, JwtError> {
        let access_token = self
            .access
            .encode(&AccessClaims::for_principal(principal, now))?;
        let refresh_token = self
            .refresh
            .encode(&RefreshClaims::for_principal(principal, now))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::Role;
    use crate::principal::Subscription;

    fn secrets() -> SigningSecrets {
        SigningSecrets::new(
            Some("access_secret_key_at_least_32_bytes!"),
            Some("refresh_secret_key_at_least_32_bytes"),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_is_deterministic_for_same_instant() {
        let issuer = TokenIssuer::new(&secrets());
        let principal = Principal::new("u1", "a@example.com", Role::Admin, Subscription::Enterprise);
        let now = Utc::now();

        let first = issuer.issue_at(&principal, now).unwrap();
        let second = issuer.issue_at(&principal, now).unwrap();

        assert_eq!(first, second);
        assert_ne!(first.access_token, first.refresh_token);
    }

    #[test]
    fn test_issue_signs_with_distinct_secrets() {
        let secrets = secrets();
        let issuer = TokenIssuer::new(&secrets);
        let principal = Principal::new("u1", "a@example.com", Role::User, Subscription::Starter);

        let pair = issuer.issue(&principal).unwrap();

        let access = JwtHandler::new(secrets.access());
        let refresh = JwtHandler::new(secrets.refresh());
        assert!(access.decode::<AccessClaims>(&pair.access_token).is_ok());
        assert!(refresh.decode::<RefreshClaims>(&pair.refresh_token).is_ok());
        assert!(refresh.decode::<serde_json::Value>(&pair.access_token).is_err());
        assert!(access.decode::<serde_json::Value>(&pair.refresh_token).is_err());
    }
}
