use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::session::errors::SessionError;
use crate::user::models::User;
use crate::user::models::Username;

/// Durable, revocable record backing one issued refresh token.
///
/// `id` equals the id of the refresh token's payload. Sessions are never
/// deleted; expiry is decided by comparing `expires_at` with the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub username: Username,
    pub refresh_token: String,
    pub user_agent: String,
    pub client_ip: String,
    pub is_blocked: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Provenance captured from the transport at login. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMetadata {
    pub user_agent: String,
    pub client_ip: String,
}

/// Lifetimes of the two tokens issued at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenDurations {
    access: Duration,
    refresh: Duration,
}

impl TokenDurations {
    /// # Errors
    /// * `InvalidTokenDurations` - Unless `0 < access < refresh`
    pub fn new(access: Duration, refresh: Duration) -> Result<Self, SessionError> {
        if access <= Duration::zero() || refresh <= access {
            return Err(SessionError::InvalidTokenDurations);
        }
        Ok(Self { access, refresh })
    }

    pub fn access(&self) -> Duration {
        self.access
    }

    pub fn refresh(&self) -> Duration {
        self.refresh
    }
}

/// Command to log a user in with a plaintext password.
#[derive(Debug)]
pub struct LoginCommand {
    pub username: Username,
    pub password: String,
    pub metadata: ClientMetadata,
}

/// Credential pair and session produced by a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub session_id: Uuid,
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_token_expires_at: DateTime<Utc>,
}

/// Fresh access token minted from a refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenewedAccessToken {
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_durations() {
        let durations = TokenDurations::new(Duration::minutes(15), Duration::hours(24)).unwrap();
        assert_eq!(durations.access(), Duration::minutes(15));
        assert_eq!(durations.refresh(), Duration::hours(24));

        assert!(matches!(
            TokenDurations::new(Duration::hours(1), Duration::hours(1)),
            Err(SessionError::InvalidTokenDurations)
        ));
        assert!(matches!(
            TokenDurations::new(Duration::zero(), Duration::hours(1)),
            Err(SessionError::InvalidTokenDurations)
        ));
    }
}
