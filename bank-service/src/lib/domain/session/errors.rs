use auth::AuthenticationError;
use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;
use uuid::Uuid;

use crate::user::errors::UserError;

/// Top-level error for login, token renewal and session revocation.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("User not found with username: {0}")]
    UserNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Session is blocked")]
    SessionRevoked,

    #[error("Session does not match the presented token")]
    SessionMismatch,

    #[error("Session has expired")]
    ExpiredSession,

    #[error("Cannot block other user's session")]
    PermissionDenied,

    #[error("Access token lifetime must be positive and shorter than the refresh token lifetime")]
    InvalidTokenDurations,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<AuthenticationError> for SessionError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => SessionError::InvalidCredentials,
            AuthenticationError::Password(e) => SessionError::Password(e),
        }
    }
}

/// The login flow reads users through the user repository; anything it
/// reports there is an infrastructure failure from the session's view.
impl From<UserError> for SessionError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DatabaseError(msg) => SessionError::DatabaseError(msg),
            other => SessionError::DatabaseError(other.to_string()),
        }
    }
}
