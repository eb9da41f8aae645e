use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::TokenError;
use super::maker::TokenMaker;
use super::payload::Payload;

/// Registered JWT claims the payload maps onto.
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    jti: Uuid,
    sub: String,
    iat: i64,
    exp: i64,
}

impl From<&Payload> for JwtClaims {
    fn from(payload: &Payload) -> Self {
        Self {
            jti: payload.id,
            sub: payload.username.clone(),
            iat: payload.issued_at.timestamp(),
            exp: payload.expired_at.timestamp(),
        }
    }
}

impl TryFrom<JwtClaims> for Payload {
    type Error = TokenError;

    fn try_from(claims: JwtClaims) -> Result<Self, Self::Error> {
        let issued_at =
            DateTime::<Utc>::from_timestamp(claims.iat, 0).ok_or(TokenError::InvalidToken)?;
        let expired_at =
            DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or(TokenError::InvalidToken)?;

        Ok(Self {
            id: claims.jti,
            username: claims.sub,
            issued_at,
            expired_at,
        })
    }
}

/// Signed-claims token maker (HS256 JWT).
///
/// Claims are readable by anyone holding the token but any modification
/// breaks the HMAC. Only HS256 is accepted on verification, so a token
/// re-labelled with another `alg` is rejected outright.
pub struct JwtMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtMaker {
    /// Minimum secret length in bytes (256 bits for HS256).
    pub const MIN_SECRET_KEY_SIZE: usize = 32;

    /// Create a new JWT maker with a secret key.
    ///
    /// # Errors
    /// * `KeyTooShort` - Secret is shorter than 32 bytes
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < Self::MIN_SECRET_KEY_SIZE {
            return Err(TokenError::KeyTooShort {
                minimum: Self::MIN_SECRET_KEY_SIZE,
                actual: secret.len(),
            });
        }

        // Expiry is checked against the payload after the signature, so the
        // library's own exp check (and its leeway) stays off.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }
}

impl TokenMaker for JwtMaker {
    fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new(username, duration)?;

        let token = encode(
            &Header::new(Algorithm::HS256),
            &JwtClaims::from(&payload),
            &self.encoding_key,
        )
        .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok((token, payload))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::InvalidToken)?;

        let payload = Payload::try_from(token_data.claims)?;
        payload.valid()?;

        Ok(payload)
    }
}
