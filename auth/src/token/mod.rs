pub mod errors;
pub mod jwt;
pub mod maker;
pub mod payload;
pub mod sealed;

pub use errors::TokenError;
pub use jwt::JwtMaker;
pub use maker::new_token_maker;
pub use maker::TokenKind;
pub use maker::TokenMaker;
pub use payload::Payload;
pub use sealed::SealedMaker;
