use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use super::INVALID_LOGIN_MESSAGE;
use crate::app::AppState;
use crate::inbound::http::extractors::RequestMetadata;
use crate::session::models::LoginCommand;
use crate::session::models::LoginResult;
use crate::user::models::Username;

pub async fn login_user(
    State(state): State<AppState>,
    RequestMetadata(metadata): RequestMetadata,
    Json(body): Json<LoginUserRequest>,
) -> Result<ApiSuccess<LoginUserResponseData>, ApiError> {
    // A name that could never have been registered is reported like any
    // other failed login.
    let username = Username::new(body.username)
        .map_err(|_| ApiError::Unauthorized(INVALID_LOGIN_MESSAGE.to_string()))?;

    let command = LoginCommand {
        username,
        password: body.password,
        metadata,
    };

    state
        .session_service
        .login_user(command)
        .await
        .map_err(ApiError::from)
        .map(|ref result| ApiSuccess::new(StatusCode::OK, result.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginUserRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginUserResponseData {
    pub session_id: String,
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_token_expires_at: DateTime<Utc>,
    pub user: UserData,
}

impl From<&LoginResult> for LoginUserResponseData {
    fn from(result: &LoginResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            access_token: result.access_token.clone(),
            access_token_expires_at: result.access_token_expires_at,
            refresh_token: result.refresh_token.clone(),
            refresh_token_expires_at: result.refresh_token_expires_at,
            user: (&result.user).into(),
        }
    }
}
