use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

use super::ApiError;
use super::ApiSuccess;
use crate::app::AppState;
use crate::inbound::http::extractors::AuthenticatedUser;

pub async fn block_session(
    State(state): State<AppState>,
    AuthenticatedUser(requester): AuthenticatedUser,
    Path(session_id): Path<String>,
) -> Result<ApiSuccess<BlockSessionResponseData>, ApiError> {
    let session_id = Uuid::parse_str(&session_id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid session ID: {}", e)))?;

    state
        .session_service
        .block_session(&requester, session_id)
        .await
        .map_err(ApiError::from)
        .map(|session| {
            ApiSuccess::new(
                StatusCode::OK,
                BlockSessionResponseData {
                    session_id: session.id.to_string(),
                    is_blocked: session.is_blocked,
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSessionResponseData {
    pub session_id: String,
    pub is_blocked: bool,
}
