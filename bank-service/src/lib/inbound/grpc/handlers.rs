use tonic::Status;

use crate::domain::session::errors::SessionError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;

pub mod block_session;
pub mod create_user;
pub mod login_user;
pub mod renew_access_token;
pub mod update_user;

const INVALID_LOGIN_MESSAGE: &str = "invalid username or password";

impl From<User> for crate::proto::User {
    fn from(user: User) -> Self {
        Self {
            username: user.username.as_str().to_string(),
            full_name: user.full_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            password_changed_at: user.password_changed_at.to_rfc3339(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

fn internal(message: String) -> Status {
    tracing::error!(error = %message, "Internal server error");
    Status::internal("internal server error")
}

pub(crate) fn user_error_status(err: UserError) -> Status {
    match err {
        UserError::InvalidUsername(_)
        | UserError::InvalidFullName(_)
        | UserError::InvalidEmail(_) => Status::invalid_argument(err.to_string()),
        UserError::NotFound(_) => Status::not_found(err.to_string()),
        UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
            Status::already_exists(err.to_string())
        }
        UserError::PermissionDenied => Status::permission_denied(err.to_string()),
        UserError::Password(_) | UserError::DatabaseError(_) => internal(err.to_string()),
    }
}

pub(crate) fn session_error_status(err: SessionError) -> Status {
    match err {
        SessionError::UserNotFound(_) | SessionError::InvalidCredentials => {
            Status::unauthenticated(INVALID_LOGIN_MESSAGE)
        }
        SessionError::Token(auth::TokenError::InvalidToken | auth::TokenError::ExpiredToken)
        | SessionError::SessionRevoked
        | SessionError::SessionMismatch
        | SessionError::ExpiredSession => Status::unauthenticated(err.to_string()),
        SessionError::SessionNotFound(_) => Status::not_found(err.to_string()),
        SessionError::PermissionDenied => Status::permission_denied(err.to_string()),
        SessionError::Token(_)
        | SessionError::InvalidTokenDurations
        | SessionError::Password(_)
        | SessionError::DatabaseError(_) => internal(err.to_string()),
    }
}
