use chrono::DateTime;
use chrono::Utc;
use serde::de::DeserializeOwned;

use super::claims::AccessClaims;
use super::claims::RefreshClaims;
use super::claims::TokenClaims;
use super::errors::TokenFailure;
use super::errors::VerifyError;
use super::handler::JwtHandler;
use crate::secrets::SigningSecrets;

/// Token verifier.
///
/// A pure function of (token, current time, secret). Every failure
/// collapses into `VerifyError::InvalidToken`; callers must choose the
/// entry point matching the token kind they expect.
#[derive(Clone)]
pub struct TokenVerifier {
    access: JwtHandler,
    refresh: JwtHandler,
}

impl TokenVerifier {
    pub fn new(secrets: &SigningSecrets) -> Self {
        Self {
            access: JwtHandler::new(secrets.access()),
            refresh: JwtHandler::new(secrets.refresh()),
        }
    }

    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, VerifyError> {
        self.verify_access_at(token, Utc::now())
    }

    pub fn verify_access_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessClaims, VerifyError> {
        Self::verify_with(&self.access, token, now)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, VerifyError> {
        self.verify_refresh_at(token, Utc::now())
    }

    pub fn verify_refresh_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<RefreshClaims, VerifyError> {
        Self::verify_with(&self.refresh, token, now)
    }

    fn verify_with<T>(handler: &JwtHandler, token: &str, now: DateTime<Utc>) -> Result<T, VerifyError>
    where
        T: TokenClaims + DeserializeOwned,
    {
        let claims: T = handler.decode(token).map_err(VerifyError::InvalidToken)?;

        if claims.is_expired(now.timestamp()) {
            return Err(VerifyError::InvalidToken(TokenFailure::Expired));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::jwt::issuer::TokenIssuer;
    use crate::principal::Principal;
    use crate::principal::Role;
    use crate::principal::Subscription;

    fn secrets() -> SigningSecrets {
        SigningSecrets::new(
            Some("access_secret_key_at_least_32_bytes!"),
            Some("refresh_secret_key_at_least_32_bytes"),
        )
        .unwrap()
    }

    fn principal() -> Principal {
        Principal::new(
            "7b0c4d1e",
            "ada@example.com",
            Role::Admin,
            Subscription::Professional,
        )
    }

    #[test]
    fn test_fresh_access_token_carries_claims() {
        let secrets = secrets();
        let pair = TokenIssuer::new(&secrets).issue(&principal()).unwrap();

        let claims = TokenVerifier::new(&secrets)
            .verify_access(&pair.access_token)
            .expect("Fresh access token should verify");

        assert_eq!(claims.user_id, "7b0c4d1e");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.subscription, Subscription::Professional);
    }

    #[test]
    fn test_access_token_expires_after_fifteen_minutes() {
        let secrets = secrets();
        let issued = Utc::now();
        let pair = TokenIssuer::new(&secrets)
            .issue_at(&principal(), issued)
            .unwrap();
        let verifier = TokenVerifier::new(&secrets);

        assert!(verifier
            .verify_access_at(&pair.access_token, issued + Duration::minutes(14))
            .is_ok());

        let err = verifier
            .verify_access_at(&pair.access_token, issued + Duration::minutes(15))
            .unwrap_err();
        assert_eq!(err.cause(), TokenFailure::Expired);
        assert_eq!(err.to_string(), "Invalid token");
    }

    #[test]
    fn test_refresh_token_lifetime_and_shape() {
        let secrets = secrets();
        let issued = Utc::now();
        let pair = TokenIssuer::new(&secrets)
            .issue_at(&principal(), issued)
            .unwrap();
        let verifier = TokenVerifier::new(&secrets);

        let claims = verifier
            .verify_refresh_at(&pair.refresh_token, issued + Duration::days(6))
            .expect("Refresh token should verify before seven days");
        assert_eq!(claims.user_id, "7b0c4d1e");

        let payload: serde_json::Value = JwtHandler::new(secrets.refresh())
            .decode(&pair.refresh_token)
            .unwrap();
        assert!(payload.get("role").is_none());
        assert!(payload.get("subscription").is_none());
        assert!(payload.get("email").is_none());

        let err = verifier
            .verify_refresh_at(&pair.refresh_token, issued + Duration::days(7) + Duration::seconds(1))
            .unwrap_err();
        assert_eq!(err, VerifyError::InvalidToken(TokenFailure::Expired));
    }

    #[test]
    fn test_tokens_do_not_cross_verify() {
        let secrets = secrets();
        let pair = TokenIssuer::new(&secrets).issue(&principal()).unwrap();
        let verifier = TokenVerifier::new(&secrets);

        let err = verifier.verify_refresh(&pair.access_token).unwrap_err();
        assert_eq!(err.cause(), TokenFailure::BadSignature);

        let err = verifier.verify_access(&pair.refresh_token).unwrap_err();
        assert_eq!(err.cause(), TokenFailure::BadSignature);
    }

    #[test]
    fn test_token_from_other_deployment_rejected() {
        let other = SigningSecrets::new(
            Some("another_access_secret_32_bytes_long!"),
            Some("another_refresh_secret_32_bytes_long"),
        )
        .unwrap();
        let pair = TokenIssuer::new(&other).issue(&principal()).unwrap();

        let result = TokenVerifier::new(&secrets()).verify_access(&pair.access_token);
        assert_eq!(
            result.unwrap_err(),
            VerifyError::InvalidToken(TokenFailure::BadSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let verifier = TokenVerifier::new(&secrets());

        for token in ["", "abc", "a.b.c", "Bearer x.y.z"] {
            let err = verifier.verify_access(token).unwrap_err();
            assert_eq!(err.cause(), TokenFailure::Malformed, "token {:?}", token);
        }
    }
}
