use crate::jwt::AccessClaims;
use crate::jwt::JwtError;
use crate::jwt::RefreshClaims;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenPair;
use crate::jwt::TokenVerifier;
use crate::jwt::VerifyError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::principal::Principal;
use crate::secrets::SigningSecrets;

/// Authentication coordinator combining password verification and token
/// issuance.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator from validated signing secrets.
    pub fn new(secrets: &SigningSecrets) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            issuer: TokenIssuer::new(secrets),
            verifier: TokenVerifier::new(secrets),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token pair.
    ///
    /// A missing stored hash is reported exactly like a wrong password.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No stored hash or password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: Option<&str>,
        principal: &Principal,
    ) -> Result<TokenPair, AuthenticationError> {
        let is_valid = stored_hash
            .map(|hash| self.password_hasher.verify(password, hash))
            .unwrap_or(false);

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issuer.issue(principal)?)
    }

    /// Issue a token pair without password verification.
    ///
    /// Used at registration and refresh, where identity was already
    /// established by other means.
    pub fn issue_tokens(&self, principal: &Principal) -> Result<TokenPair, JwtError> {
        self.issuer.issue(principal)
    }

    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, VerifyError> {
        self.verifier.verify_access(token)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, VerifyError> {
        self.verifier.verify_refresh(token)
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }
}
