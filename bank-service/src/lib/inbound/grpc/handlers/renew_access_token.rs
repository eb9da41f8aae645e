use tonic::Status;

use super::session_error_status;
use crate::app::AppState;
use crate::proto::RenewAccessTokenRequest;
use crate::proto::RenewAccessTokenResponse;

pub async fn renew_access_token(
    state: &AppState,
    request: RenewAccessTokenRequest,
) -> Result<RenewAccessTokenResponse, Status> {
    let renewed = state
        .session_service
        .renew_access_token(&request.refresh_token)
        .await
        .map_err(session_error_status)?;

    Ok(RenewAccessTokenResponse {
        access_token: renewed.access_token,
        access_token_expires_at: renewed.access_token_expires_at.to_rfc3339(),
    })
}
