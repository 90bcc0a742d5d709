//! Authentication core library
//!
//! Provides the authentication building blocks of the platform:
//! - Credential hashing (Argon2id)
//! - Access/refresh token issuance and verification (HS256 JWT)
//! - Route guarding for page requests
//! - Signing secret validation
//!
//! Services define their own user entity and map it to a [`Principal`]
//! before issuing tokens.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Token Pair
//! ```
//! use auth::{Authenticator, Principal, Role, SigningSecrets, Subscription};
//!
//! let secrets = SigningSecrets::new(
//!     Some("access_secret_key_at_least_32_bytes!"),
//!     Some("refresh_secret_key_at_least_32_bytes"),
//! )
//! .unwrap();
//! let auth = Authenticator::new(&secrets);
//!
//! let principal = Principal::new("user123", "alice@example.com", Role::User, Subscription::Starter);
//! let tokens = auth.issue_tokens(&principal).unwrap();
//!
//! let claims = auth.verify_access(&tokens.access_token).unwrap();
//! assert_eq!(claims.email, "alice@example.com");
//! ```
//!
//! ## Route Guard
//! ```
//! use auth::{GuardDecision, RouteGuard, SigningSecrets, TokenVerifier};
//!
//! let secrets = SigningSecrets::new(
//!     Some("access_secret_key_at_least_32_bytes!"),
//!     Some("refresh_secret_key_at_least_32_bytes"),
//! )
//! .unwrap();
//! let guard = RouteGuard::new(TokenVerifier::new(&secrets));
//!
//! assert_eq!(
//!     guard.decide("/dashboard", None),
//!     GuardDecision::Redirect("/auth/login?redirect=/dashboard".to_string())
//! );
//! ```

pub mod authenticator;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod principal;
pub mod secrets;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use guard::extract_token;
pub use guard::GuardDecision;
pub use guard::RouteGuard;
pub use guard::RouteKind;
pub use guard::RouteTable;
pub use guard::ACCESS_TOKEN_COOKIE;
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::RefreshClaims;
pub use jwt::TokenFailure;
pub use jwt::TokenIssuer;
pub use jwt::TokenPair;
pub use jwt::TokenVerifier;
pub use jwt::VerifyError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use principal::Principal;
pub use principal::Role;
pub use principal::Subscription;
pub use secrets::SecretError;
pub use secrets::SigningSecrets;
