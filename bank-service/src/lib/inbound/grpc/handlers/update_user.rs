use auth::Payload;
use tonic::Status;

use super::create_user::check_password;
use super::user_error_status;
use crate::app::AppState;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::FullName;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::Username;
use crate::proto::UpdateUserRequest;
use crate::proto::UpdateUserResponse;
use crate::user::errors::UserError;

pub async fn update_user(
    state: &AppState,
    requester: &Payload,
    request: UpdateUserRequest,
) -> Result<UpdateUserResponse, Status> {
    if let Some(password) = &request.password {
        check_password(password)?;
    }
    let command = into_command(request).map_err(user_error_status)?;

    let user = state
        .user_service
        .update_user(requester, command)
        .await
        .map_err(user_error_status)?;

    Ok(UpdateUserResponse {
        user: Some(user.into()),
    })
}

fn into_command(request: UpdateUserRequest) -> Result<UpdateUserCommand, UserError> {
    Ok(UpdateUserCommand {
        username: Username::new(request.username)?,
        full_name: request.full_name.map(FullName::new).transpose()?,
        email: request.email.map(EmailAddress::new).transpose()?,
        password: request.password,
    })
}
