use chrono::DateTime;
use chrono::Duration;
use chrono::SubsecRound;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::TokenError;

/// Authenticated claims carried by a token.
///
/// `id` is a random 128-bit identifier; for refresh tokens it doubles as the
/// primary key of the backing session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub id: Uuid,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expired_at: DateTime<Utc>,
}

impl Payload {
    /// Create a payload for `username` valid for `duration` from now.
    ///
    /// Timestamps are truncated to whole seconds so every token format can
    /// carry them without loss.
    ///
    /// # Errors
    /// * `InvalidDuration` - `duration` pushes the expiry out of the representable range
    pub fn new(username: impl Into<String>, duration: Duration) -> Result<Self, TokenError> {
        let issued_at = Utc::now().trunc_subsecs(0);
        let expired_at = issued_at
            .checked_add_signed(duration)
            .ok_or(TokenError::InvalidDuration)?;

        Ok(Self {
            id: Uuid::new_v4(),
            username: username.into(),
            issued_at,
            expired_at,
        })
    }

    /// Check the payload against the current time.
    pub fn valid(&self) -> Result<(), TokenError> {
        self.valid_at(Utc::now())
    }

    /// Check the payload against `now`. Valid while `now <= expired_at`.
    pub fn valid_at(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        if now > self.expired_at {
            return Err(TokenError::ExpiredToken);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_payload() {
        let payload = Payload::new("alice", Duration::minutes(15)).unwrap();

        assert_eq!(payload.username, "alice");
        assert_eq!(payload.expired_at - payload.issued_at, Duration::minutes(15));
        assert_eq!(payload.issued_at.timestamp_subsec_nanos(), 0);
        assert!(payload.valid().is_ok());
    }

    #[test]
    fn test_ids_are_unique() {
        let first = Payload::new("alice", Duration::minutes(1)).unwrap();
        let second = Payload::new("alice", Duration::minutes(1)).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_valid_at_boundary() {
        let payload = Payload::new("alice", Duration::seconds(10)).unwrap();

        assert!(payload.valid_at(payload.expired_at).is_ok());
        assert_eq!(
            payload.valid_at(payload.expired_at + Duration::seconds(1)),
            Err(TokenError::ExpiredToken)
        );
    }

    #[test]
    fn test_negative_duration_is_expired() {
        let payload = Payload::new("alice", Duration::seconds(-1)).unwrap();
        assert_eq!(payload.valid(), Err(TokenError::ExpiredToken));
    }

    #[test]
    fn test_out_of_range_duration() {
        let result = Payload::new("alice", Duration::days(365 * 1_000_000));
        assert_eq!(result, Err(TokenError::InvalidDuration));
    }
}
