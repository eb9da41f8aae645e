use std::sync::Arc;

use chrono::Duration;

use crate::authorization::bearer_token;
use crate::authorization::AuthorizationError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Payload;
use crate::token::TokenError;
use crate::token::TokenMaker;

/// Authentication coordinator combining password hashing and token handling.
///
/// This is the single verification core behind every transport: HTTP and
/// gRPC adapters hand it the raw authorization value and get back either a
/// payload or a classified failure.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_maker: Arc<dyn TokenMaker>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
}

impl Authenticator {
    /// Create a new authenticator around a token maker.
    pub fn new(token_maker: Arc<dyn TokenMaker>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_maker,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored hash is malformed or the primitive failed
    pub fn verify_password(
        &self,
        password: &str,
        hashed_password: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, hashed_password)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Create a token for `username` valid for `duration`.
    pub fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        self.token_maker.create_token(username, duration)
    }

    /// Verify a bare token.
    pub fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        self.token_maker.verify_token(token)
    }

    /// Authorize a request from its raw authorization value.
    ///
    /// # Arguments
    /// * `header_value` - Value of the `authorization` header or metadata entry, if any
    ///
    /// # Errors
    /// * `MissingCredential` / `MalformedHeader` / `UnsupportedScheme` - Value rejected before verification
    /// * `Token` - The token itself is invalid or expired
    pub fn authorize(&self, header_value: Option<&str>) -> Result<Payload, AuthorizationError> {
        let token = bearer_token(header_value)?;
        Ok(self.token_maker.verify_token(token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::new_token_maker;
    use crate::token::TokenKind;

    fn authenticator(kind: TokenKind) -> Authenticator {
        let maker = new_token_maker(kind, b"test_secret_key_at_least_32_byte")
            .expect("Failed to build token maker");
        Authenticator::new(maker)
    }

    #[test]
    fn test_verify_password() {
        let authenticator = authenticator(TokenKind::Jwt);

        let hash = authenticator
            .hash_password("Secret123!")
            .expect("Failed to hash password");

        assert_eq!(authenticator.verify_password("Secret123!", &hash), Ok(()));
        assert_eq!(
            authenticator.verify_password("wrong_password", &hash),
            Err(AuthenticationError::InvalidCredentials)
        );
        assert!(matches!(
            authenticator.verify_password("Secret123!", "garbage"),
            Err(AuthenticationError::Password(PasswordError::MalformedHash(_)))
        ));
    }

    #[test]
    fn test_authorize_success() {
        for kind in [TokenKind::Jwt, TokenKind::Sealed] {
            let authenticator = authenticator(kind);
            let (token, payload) = authenticator
                .create_token("alice", Duration::minutes(5))
                .unwrap();

            let header = format!("Bearer {token}");
            assert_eq!(authenticator.authorize(Some(&header)), Ok(payload));
        }
    }

    #[test]
    fn test_authorize_failures() {
        let authenticator = authenticator(TokenKind::Jwt);
        let (expired, _) = authenticator
            .create_token("alice", Duration::seconds(-1))
            .unwrap();

        assert_eq!(
            authenticator.authorize(None),
            Err(AuthorizationError::MissingCredential)
        );
        assert_eq!(
            authenticator.authorize(Some("Bearer")),
            Err(AuthorizationError::MalformedHeader)
        );
        assert_eq!(
            authenticator.authorize(Some("Token abc")),
            Err(AuthorizationError::UnsupportedScheme("token".to_string()))
        );
        assert_eq!(
            authenticator.authorize(Some("Bearer not-a-token")),
            Err(AuthorizationError::Token(TokenError::InvalidToken))
        );
        assert_eq!(
            authenticator.authorize(Some(&format!("Bearer {expired}"))),
            Err(AuthorizationError::Token(TokenError::ExpiredToken))
        );
    }
}
