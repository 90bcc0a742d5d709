use std::fmt;

use thiserror::Error;

/// Error type for token issuance.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Why a token was rejected.
///
/// Only for trusted internal callers (logging, metrics). Never send this to
/// a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFailure {
    Expired,
    BadSignature,
    Malformed,
}

impl fmt::Display for TokenFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            TokenFailure::Expired => "expired",
            TokenFailure::BadSignature => "bad_signature",
            TokenFailure::Malformed => "malformed",
        };
        f.write_str(reason)
    }
}

/// Verification failure.
///
/// Displays as a single opaque outcome whatever the cause; the cause is
/// available through [`VerifyError::cause`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Invalid token")]
    InvalidToken(TokenFailure),
}

impl VerifyError {
    pub fn cause(&self) -> TokenFailure {
        match self {
            VerifyError::InvalidToken(cause) => *cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_hides_cause() {
        for cause in [
            TokenFailure::Expired,
            TokenFailure::BadSignature,
            TokenFailure::Malformed,
        ] {
            let err = VerifyError::InvalidToken(cause);
            assert_eq!(err.to_string(), "Invalid token");
            assert_eq!(err.cause(), cause);
        }
    }
}
