use async_trait::async_trait;
use auth::Payload;
use uuid::Uuid;

use crate::session::errors::SessionError;
use crate::session::models::LoginCommand;
use crate::session::models::LoginResult;
use crate::session::models::RenewedAccessToken;
use crate::session::models::Session;

/// Port for session domain service operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Authenticate with username and password and open a session.
    ///
    /// # Returns
    /// Access and refresh tokens, their expiries, and the session id
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this username
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored hash is malformed
    /// * `Token` - Token creation failed
    /// * `DatabaseError` - Database operation failed
    async fn login_user(&self, command: LoginCommand) -> Result<LoginResult, SessionError>;

    /// Mint a new access token from a refresh token.
    ///
    /// The session is not rotated; the same refresh token stays usable until
    /// it expires or the session is blocked.
    ///
    /// # Errors
    /// * `Token` - Refresh token is invalid or expired
    /// * `SessionNotFound` - No session for the token's id
    /// * `SessionRevoked` - Session is blocked
    /// * `SessionMismatch` - Session belongs to another user or another token
    /// * `ExpiredSession` - Session has expired
    /// * `DatabaseError` - Database operation failed
    async fn renew_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<RenewedAccessToken, SessionError>;

    /// Block a session so it never yields another access token.
    ///
    /// Blocking an already blocked session succeeds.
    ///
    /// # Errors
    /// * `SessionNotFound` - No session with this id
    /// * `PermissionDenied` - Requester does not own the session
    /// * `DatabaseError` - Database operation failed
    async fn block_session(
        &self,
        requester: &Payload,
        session_id: Uuid,
    ) -> Result<Session, SessionError>;
}

/// Persistence operations for sessions.
///
/// Each operation must be atomic, and a block must be visible to every
/// later `find_by_id`.
#[async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Persist new session.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, session: Session) -> Result<Session, SessionError>;

    /// Retrieve session by id.
    ///
    /// # Returns
    /// Optional session (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Session>, SessionError>;

    /// Set the revocation flag of a session.
    ///
    /// # Returns
    /// The blocked session
    ///
    /// # Errors
    /// * `SessionNotFound` - No session with this id
    /// * `DatabaseError` - Database operation failed
    async fn block(&self, id: &Uuid) -> Result<Session, SessionError>;
}
