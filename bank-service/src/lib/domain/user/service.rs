use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Payload;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token core
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let hashed_password = self.authenticator.hash_password(&command.password)?;

        let now = Utc::now();
        let user = User {
            username: command.username,
            full_name: command.full_name,
            email: command.email,
            hashed_password,
            password_changed_at: now,
            created_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(username = %created_user.username, "User created");

        Ok(created_user)
    }

    async fn get_user(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFound(username.to_string()))
    }

    async fn update_user(
        &self,
        requester: &Payload,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        if requester.username != command.username.as_str() {
            tracing::warn!(
                requester = %requester.username,
                target = %command.username,
                "Rejected update of another user's info"
            );
            return Err(UserError::PermissionDenied);
        }

        let mut user = self.get_user(&command.username).await?;

        if let Some(full_name) = command.full_name {
            user.full_name = full_name;
        }

        if let Some(email) = command.email {
            user.email = email;
        }

        if let Some(password) = command.password {
            user.hashed_password = self.authenticator.hash_password(&password)?;
            user.password_changed_at = Utc::now();
        }

        let updated_user = self.repository.update(user).await?;
        tracing::info!(username = %updated_user.username, "User updated");

        Ok(updated_user)
    }
}
