use auth::Payload;
use tonic::Status;
use uuid::Uuid;

use super::session_error_status;
use crate::app::AppState;
use crate::proto::BlockSessionRequest;
use crate::proto::BlockSessionResponse;

pub async fn block_session(
    state: &AppState,
    requester: &Payload,
    request: BlockSessionRequest,
) -> Result<BlockSessionResponse, Status> {
    let session_id = Uuid::parse_str(&request.session_id)
        .map_err(|e| Status::invalid_argument(format!("Invalid session ID: {}", e)))?;

    let session = state
        .session_service
        .block_session(requester, session_id)
        .await
        .map_err(session_error_status)?;

    Ok(BlockSessionResponse {
        session_id: session.id.to_string(),
    })
}
