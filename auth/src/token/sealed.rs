use aes_gcm::aead::Aead;
use aes_gcm::aead::AeadCore;
use aes_gcm::aead::KeyInit;
use aes_gcm::aead::OsRng;
use aes_gcm::aead::Payload as AeadPayload;
use aes_gcm::Aes256Gcm;
use aes_gcm::Nonce;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Duration;

use super::errors::TokenError;
use super::maker::TokenMaker;
use super::payload::Payload;

/// Version and purpose prefix; also bound into the tag as associated data.
const HEADER: &str = "v1.local.";

/// AES-256-GCM nonce size (bytes)
const NONCE_SIZE: usize = 12;

/// Encrypted-claims token maker.
///
/// Wire format: `v1.local.` followed by base64url (no padding) of
/// `nonce || ciphertext || tag`. The JSON payload is never visible to the
/// bearer, and a single flipped bit anywhere fails authentication.
pub struct SealedMaker {
    cipher: Aes256Gcm,
}

impl SealedMaker {
    /// Required symmetric key size (bytes)
    pub const KEY_SIZE: usize = 32;

    /// Create a new sealed token maker.
    ///
    /// # Errors
    /// * `InvalidKeyLength` - Key is not exactly 32 bytes
    pub fn new(symmetric_key: &[u8]) -> Result<Self, TokenError> {
        if symmetric_key.len() != Self::KEY_SIZE {
            return Err(TokenError::InvalidKeyLength {
                expected: Self::KEY_SIZE,
                actual: symmetric_key.len(),
            });
        }

        let cipher = Aes256Gcm::new_from_slice(symmetric_key).map_err(|_| {
            TokenError::InvalidKeyLength {
                expected: Self::KEY_SIZE,
                actual: symmetric_key.len(),
            }
        })?;

        Ok(Self { cipher })
    }
}

impl TokenMaker for SealedMaker {
    fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new(username, duration)?;
        let plaintext =
            serde_json::to_vec(&payload).map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(
                &nonce,
                AeadPayload {
                    msg: &plaintext,
                    aad: HEADER.as_bytes(),
                },
            )
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);

        let token = format!("{HEADER}{}", URL_SAFE_NO_PAD.encode(sealed));
        Ok((token, payload))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let body = token.strip_prefix(HEADER).ok_or(TokenError::InvalidToken)?;
        let sealed = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_| TokenError::InvalidToken)?;

        if sealed.len() <= NONCE_SIZE {
            return Err(TokenError::InvalidToken);
        }
        let (nonce, ciphertext) = sealed.split_at(NONCE_SIZE);

        let plaintext = self
            .cipher
            .decrypt(
                Nonce::from_slice(nonce),
                AeadPayload {
                    msg: ciphertext,
                    aad: HEADER.as_bytes(),
                },
            )
            .map_err(|_| TokenError::InvalidToken)?;

        let payload: Payload =
            serde_json::from_slice(&plaintext).map_err(|_| TokenError::InvalidToken)?;
        payload.valid()?;

        Ok(payload)
    }
}
