use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::RegisterUserCommand;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;

pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .register_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterUserRequest {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    password_confirmation: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterUserRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterUserRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterUserRequestError> {
        Ok(RegisterUserCommand {
            first_name: PersonName::new(self.first_name)?,
            last_name: PersonName::new(self.last_name)?,
            email: EmailAddress::new(self.email)?,
            password: self.password,
            password_confirmation: self.password_confirmation,
        })
    }
}

impl From<ParseRegisterUserRequestError> for ApiError {
    fn from(err: ParseRegisterUserRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(first_name: &str, email: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            first_name: first_name.to_string(),
            last_name: "Muster".to_string(),
            email: email.to_string(),
            password: "Secret1!".to_string(),
            password_confirmation: "Secret1!".to_string(),
        }
    }

    #[test]
    fn test_request_into_command() {
        let command = request("Peter", "peter@example.com")
            .try_into_command()
            .unwrap();

        assert_eq!(command.first_name.as_str(), "Peter");
        assert_eq!(command.email.as_str(), "peter@example.com");
        assert_eq!(command.password, command.password_confirmation);
    }

    #[test]
    fn test_request_with_bad_fields() {
        assert!(matches!(
            request("P", "peter@example.com").try_into_command(),
            Err(ParseRegisterUserRequestError::Name(_))
        ));
        assert!(matches!(
            request("Peter", "not-an-email").try_into_command(),
            Err(ParseRegisterUserRequestError::Email(_))
        ));
    }
}
