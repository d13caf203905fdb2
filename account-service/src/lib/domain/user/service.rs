use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use credentials::AuthenticationError;

use crate::domain::user::credential_service::CredentialService;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    credentials: CredentialService,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `credentials` - Password policy, hashing and authentication
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, credentials: CredentialService) -> Self {
        Self {
            repository,
            credentials,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        self.credentials
            .validate(&command.password)
            .into_result()?;

        if command.password != command.password_confirmation {
            return Err(UserError::PasswordMismatch);
        }

        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.credentials.hash(command.password).await?;

        let user = User {
            id: UserId::new(),
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn authenticate(&self, command: LoginCommand) -> Result<User, UserError> {
        let user = match command.email.as_deref() {
            Some(email) => match self.repository.find_by_email(email).await? {
                Some(user) => Some(user),
                None => {
                    self.credentials
                        .verify_unknown_identity(command.password)
                        .await?;
                    return Err(UserError::NotFoundByEmail(email.to_string()));
                }
            },
            None => None,
        };

        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        self.credentials
            .authenticate(command.email, command.password, stored_hash)
            .await?;

        user.ok_or(UserError::Authentication(
            AuthenticationError::InvalidCredentials,
        ))
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        self.repository
            .find_by_email(email.as_str())
            .await?
            .ok_or(UserError::NotFoundByEmail(email.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(first_name) = command.first_name {
            user.first_name = first_name;
        }

        if let Some(last_name) = command.last_name {
            user.last_name = last_name;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_password) = command.password {
            self.credentials.validate(&new_password).into_result()?;
            user.password_hash = self.credentials.hash(new_password).await?;
            tracing::info!(user_id = %user.id, "Password changed");
        }

        self.repository.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
