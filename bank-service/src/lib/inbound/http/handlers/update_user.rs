use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::app::AppState;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::FullName;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::Username;
use crate::domain::user::models::MIN_PASSWORD_LENGTH;
use crate::inbound::http::extractors::AuthenticatedUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::user::errors::UserError;

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self, username: String) -> Result<UpdateUserCommand, UserError> {
        // Validation happens here - errors are automatically converted via #[from]
        let username = Username::new(username)?;
        let full_name = self.full_name.map(FullName::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;

        Ok(UpdateUserCommand {
            username,
            full_name,
            email,
            password: self.password,
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    AuthenticatedUser(requester): AuthenticatedUser,
    Path(username): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    if let Some(password) = &body.password {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ApiError::UnprocessableEntity(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
    }

    let command = body.try_into_command(username)?;

    state
        .user_service
        .update_user(&requester, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
