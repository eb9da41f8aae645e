use std::sync::Arc;

use chrono::Duration;
use serde::Deserialize;

use super::errors::TokenError;
use super::jwt::JwtMaker;
use super::payload::Payload;
use super::sealed::SealedMaker;

/// Contract shared by every token format.
///
/// Implementations hold only the immutable server key, so a single maker can
/// be shared behind an `Arc` by any number of concurrent requests.
pub trait TokenMaker: Send + Sync + 'static {
    /// Create a token for `username` valid for `duration`.
    ///
    /// # Returns
    /// The serialized token and the payload it carries
    ///
    /// # Errors
    /// * `InvalidDuration` - Expiry is not representable
    /// * `EncodingFailed` - Sealing the claims failed
    fn create_token(&self, username: &str, duration: Duration)
        -> Result<(String, Payload), TokenError>;

    /// Verify a token and return its payload.
    ///
    /// # Errors
    /// * `InvalidToken` - Structure, signature or tag does not check out
    /// * `ExpiredToken` - Envelope is authentic but the expiry has passed
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}

/// Token format selected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// HS256-signed JWT: claims readable, tamper-evident.
    Jwt,
    /// AES-256-GCM sealed claims: confidential and tamper-evident.
    Sealed,
}

/// Build the token maker for `kind` keyed with `symmetric_key`.
///
/// # Errors
/// * `KeyTooShort` / `InvalidKeyLength` - Key does not suit the chosen format
pub fn new_token_maker(
    kind: TokenKind,
    symmetric_key: &[u8],
) -> Result<Arc<dyn TokenMaker>, TokenError> {
    let maker: Arc<dyn TokenMaker> = match kind {
        TokenKind::Jwt => Arc::new(JwtMaker::new(symmetric_key)?),
        TokenKind::Sealed => Arc::new(SealedMaker::new(symmetric_key)?),
    };
    Ok(maker)
}
