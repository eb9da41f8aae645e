use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::app::AppState;
use crate::session::errors::SessionError;
use crate::session::models::RenewedAccessToken;

pub async fn renew_access_token(
    State(state): State<AppState>,
    Json(body): Json<RenewAccessTokenRequest>,
) -> Result<ApiSuccess<RenewAccessTokenResponseData>, ApiError> {
    state
        .session_service
        .renew_access_token(&body.refresh_token)
        .await
        .map_err(|e| match e {
            // A refresh token without a session is a failed authentication,
            // unlike an unknown id in a path.
            SessionError::SessionNotFound(_) => ApiError::Unauthorized(e.to_string()),
            other => ApiError::from(other),
        })
        .map(|ref renewed| ApiSuccess::new(StatusCode::OK, renewed.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenewAccessTokenRequest {
    refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenewAccessTokenResponseData {
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
}

impl From<&RenewedAccessToken> for RenewAccessTokenResponseData {
    fn from(renewed: &RenewedAccessToken) -> Self {
        Self {
            access_token: renewed.access_token.clone(),
            access_token_expires_at: renewed.access_token_expires_at,
        }
    }
}
