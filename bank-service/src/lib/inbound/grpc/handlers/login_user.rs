use tonic::Status;

use super::session_error_status;
use super::INVALID_LOGIN_MESSAGE;
use crate::app::AppState;
use crate::proto::LoginUserRequest;
use crate::proto::LoginUserResponse;
use crate::session::models::ClientMetadata;
use crate::session::models::LoginCommand;
use crate::user::models::Username;

pub async fn login_user(
    state: &AppState,
    metadata: ClientMetadata,
    request: LoginUserRequest,
) -> Result<LoginUserResponse, Status> {
    let username = Username::new(request.username)
        .map_err(|_| Status::unauthenticated(INVALID_LOGIN_MESSAGE))?;

    let result = state
        .session_service
        .login_user(LoginCommand {
            username,
            password: request.password,
            metadata,
        })
        .await
        .map_err(session_error_status)?;

    Ok(LoginUserResponse {
        user: Some(result.user.into()),
        session_id: result.session_id.to_string(),
        access_token: result.access_token,
        refresh_token: result.refresh_token,
        access_token_expires_at: result.access_token_expires_at.to_rfc3339(),
        refresh_token_expires_at: result.refresh_token_expires_at.to_rfc3339(),
    })
}
