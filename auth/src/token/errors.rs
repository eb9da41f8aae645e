use thiserror::Error;

/// Error type for token creation and verification.
///
/// `InvalidToken` and `ExpiredToken` carry no detail from the envelope; a
/// caller learns only whether the credential was forged or stale.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid key size: must be at least {minimum} bytes, got {actual}")]
    KeyTooShort { minimum: usize, actual: usize },

    #[error("Invalid key size: must be exactly {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Token lifetime is out of range")]
    InvalidDuration,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,
}
