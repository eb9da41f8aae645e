use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Payload;
use chrono::Utc;
use uuid::Uuid;

use crate::session::errors::SessionError;
use crate::session::models::LoginCommand;
use crate::session::models::LoginResult;
use crate::session::models::RenewedAccessToken;
use crate::session::models::Session;
use crate::session::models::TokenDurations;
use crate::session::ports::SessionRepository;
use crate::session::ports::SessionServicePort;
use crate::user::ports::UserRepository;

/// Domain service for the login / refresh / revoke lifecycle.
///
/// Reads users and sessions only through their repositories; the only state
/// it owns is the configuration it was built with.
pub struct SessionService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    users: Arc<UR>,
    sessions: Arc<SR>,
    authenticator: Arc<Authenticator>,
    durations: TokenDurations,
}

impl<UR, SR> SessionService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User lookup used to fetch the stored password hash
    /// * `sessions` - Session persistence implementation
    /// * `authenticator` - Password verification and token core
    /// * `durations` - Validated access and refresh token lifetimes
    pub fn new(
        users: Arc<UR>,
        sessions: Arc<SR>,
        authenticator: Arc<Authenticator>,
        durations: TokenDurations,
    ) -> Self {
        Self {
            users,
            sessions,
            authenticator,
            durations,
        }
    }
}

#[async_trait]
impl<UR, SR> SessionServicePort for SessionService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    async fn login_user(&self, command: LoginCommand) -> Result<LoginResult, SessionError> {
        let user = self
            .users
            .find_by_username(&command.username)
            .await?
            .ok_or_else(|| {
                tracing::warn!(username = %command.username, "Login for unknown user");
                SessionError::UserNotFound(command.username.to_string())
            })?;

        self.authenticator
            .verify_password(&command.password, &user.hashed_password)
            .map_err(|e| {
                tracing::warn!(username = %user.username, error = %e, "Password check failed");
                SessionError::from(e)
            })?;

        let username = user.username.as_str();
        let (access_token, access_payload) = self
            .authenticator
            .create_token(username, self.durations.access())?;
        let (refresh_token, refresh_payload) = self
            .authenticator
            .create_token(username, self.durations.refresh())?;

        let session = self
            .sessions
            .create(Session {
                id: refresh_payload.id,
                username: user.username.clone(),
                refresh_token: refresh_token.clone(),
                user_agent: command.metadata.user_agent,
                client_ip: command.metadata.client_ip,
                is_blocked: false,
                expires_at: refresh_payload.expired_at,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            username = %user.username,
            session_id = %session.id,
            client_ip = %session.client_ip,
            "User logged in"
        );

        Ok(LoginResult {
            user,
            session_id: session.id,
            access_token,
            access_token_expires_at: access_payload.expired_at,
            refresh_token,
            refresh_token_expires_at: refresh_payload.expired_at,
        })
    }

    async fn renew_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<RenewedAccessToken, SessionError> {
        let payload = self.authenticator.verify_token(refresh_token)?;

        let session = self
            .sessions
            .find_by_id(&payload.id)
            .await?
            .ok_or(SessionError::SessionNotFound(payload.id))?;

        if session.is_blocked {
            tracing::warn!(session_id = %session.id, "Renewal attempted on blocked session");
            return Err(SessionError::SessionRevoked);
        }

        if session.username.as_str() != payload.username || session.refresh_token != refresh_token
        {
            tracing::warn!(session_id = %session.id, "Refresh token does not match its session");
            return Err(SessionError::SessionMismatch);
        }

        if Utc::now() > session.expires_at {
            return Err(SessionError::ExpiredSession);
        }

        let (access_token, access_payload) = self
            .authenticator
            .create_token(&payload.username, self.durations.access())?;

        tracing::info!(
            username = %payload.username,
            session_id = %session.id,
            "Access token renewed"
        );

        Ok(RenewedAccessToken {
            access_token,
            access_token_expires_at: access_payload.expired_at,
        })
    }

    async fn block_session(
        &self,
        requester: &Payload,
        session_id: Uuid,
    ) -> Result<Session, SessionError> {
        let session = self
            .sessions
            .find_by_id(&session_id)
            .await?
            .ok_or(SessionError::SessionNotFound(session_id))?;

        if session.username.as_str() != requester.username {
            tracing::warn!(
                requester = %requester.username,
                session_id = %session_id,
                "Rejected block of another user's session"
            );
            return Err(SessionError::PermissionDenied);
        }

        if session.is_blocked {
            return Ok(session);
        }

        let blocked = self.sessions.block(&session_id).await?;
        tracing::info!(username = %blocked.username, session_id = %blocked.id, "Session blocked");

        Ok(blocked)
    }
}
