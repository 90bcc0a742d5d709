pub mod claims;
pub mod errors;
pub mod handler;
pub mod issuer;
pub mod verifier;

pub use claims::AccessClaims;
pub use claims::RefreshClaims;
pub use claims::TokenClaims;
pub use errors::JwtError;
pub use errors::TokenFailure;
pub use errors::VerifyError;
pub use handler::JwtHandler;
pub use issuer::TokenIssuer;
pub use issuer::TokenPair;
pub use verifier::TokenVerifier;
