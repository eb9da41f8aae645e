use thiserror::Error;

use crate::token::TokenError;

/// Header (HTTP) and metadata key (gRPC) carrying the credential.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// The only supported authorization scheme, compared case-insensitively.
pub const BEARER_SCHEME: &str = "bearer";

/// Failure to extract an authenticated identity from a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("authorization header is not provided")]
    MissingCredential,

    #[error("invalid authorization header format")]
    MalformedHeader,

    #[error("unsupported authorization type {0}")]
    UnsupportedScheme(String),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Extract the bearer token from an authorization header value.
///
/// The value is split on whitespace; the first field must be the bearer
/// scheme (any case) and the second field is the token. Trailing fields are
/// ignored.
///
/// # Errors
/// * `MissingCredential` - No value, or an empty one
/// * `MalformedHeader` - Fewer than two fields
/// * `UnsupportedScheme` - First field is not `bearer`
pub fn bearer_token(header_value: Option<&str>) -> Result<&str, AuthorizationError> {
    let header_value = match header_value {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthorizationError::MissingCredential),
    };

    let mut fields = header_value.split_whitespace();
    let (Some(scheme), Some(token)) = (fields.next(), fields.next()) else {
        return Err(AuthorizationError::MalformedHeader);
    };

    let scheme = scheme.to_lowercase();
    if scheme != BEARER_SCHEME {
        return Err(AuthorizationError::UnsupportedScheme(scheme));
    }

    Ok(token)
}
