//! Authentication utilities library
//!
//! Provides the credential core shared by every transport of the bank service:
//! - Password hashing (Argon2id)
//! - Token creation and verification behind one contract, with a signed
//!   (JWT) and a sealed (AES-256-GCM) format
//! - Bearer authorization parsing
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{new_token_maker, TokenKind};
//! use chrono::Duration;
//!
//! let maker = new_token_maker(TokenKind::Sealed, b"0123456789abcdef0123456789abcdef").unwrap();
//! let (token, payload) = maker.create_token("alice", Duration::minutes(15)).unwrap();
//! let verified = maker.verify_token(&token).unwrap();
//! assert_eq!(verified, payload);
//! ```
//!
//! ## Request Authorization
//! ```
//! use auth::{new_token_maker, Authenticator, TokenKind};
//! use chrono::Duration;
//!
//! let maker = new_token_maker(TokenKind::Jwt, b"secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(maker);
//!
//! let (token, _) = auth.create_token("alice", Duration::minutes(15)).unwrap();
//! let header = format!("Bearer {}", token);
//! let payload = auth.authorize(Some(&header)).unwrap();
//! assert_eq!(payload.username, "alice");
//! ```

pub mod authenticator;
pub mod authorization;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authorization::AuthorizationError;
pub use authorization::AUTHORIZATION_HEADER;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::new_token_maker;
pub use token::Payload;
pub use token::TokenError;
pub use token::TokenKind;
pub use token::TokenMaker;
