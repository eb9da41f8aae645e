use tonic::Status;

use super::user_error_status;
use crate::app::AppState;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::FullName;
use crate::domain::user::models::Username;
use crate::domain::user::models::MIN_PASSWORD_LENGTH;
use crate::proto::CreateUserRequest;
use crate::proto::CreateUserResponse;

pub async fn create_user(
    state: &AppState,
    request: CreateUserRequest,
) -> Result<CreateUserResponse, Status> {
    let username = Username::new(request.username)
        .map_err(|e| Status::invalid_argument(format!("Invalid username: {}", e)))?;
    let full_name = FullName::new(request.full_name)
        .map_err(|e| Status::invalid_argument(format!("Invalid full name: {}", e)))?;
    let email = EmailAddress::new(request.email)
        .map_err(|e| Status::invalid_argument(format!("Invalid email: {}", e)))?;
    check_password(&request.password)?;

    let command = CreateUserCommand::new(username, full_name, email, request.password);
    let user = state
        .user_service
        .create_user(command)
        .await
        .map_err(user_error_status)?;

    Ok(CreateUserResponse {
        user: Some(user.into()),
    })
}

pub(super) fn check_password(password: &str) -> Result<(), Status> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Status::invalid_argument(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}
