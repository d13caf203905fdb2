use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use credentials::AuthenticationError;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    tracing::info!(email = body.email.as_deref().unwrap_or_default(), "Login attempt");

    let user = state
        .user_service
        .authenticate(body.into())
        .await
        .map_err(|e| match e {
            // Unknown account and bad password look the same to the client
            UserError::NotFoundByEmail(_) | UserError::Authentication(_) => {
                tracing::warn!(reason = %e, "Login rejected");
                ApiError::Unauthorized(AuthenticationError::PUBLIC_MESSAGE.to_string())
            }
            _ => ApiError::from(e),
        })?;

    tracing::info!(user_id = %user.id, "Login successful");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            message: LOGIN_SUCCESS_MESSAGE.to_string(),
            success: true,
            user: (&user).into(),
        },
    ))
}

/// Both fields may be absent; that is a failed login, not a malformed request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct LoginRequestBody {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl From<LoginRequestBody> for LoginCommand {
    fn from(body: LoginRequestBody) -> Self {
        LoginCommand {
            email: body.email,
            password: body.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub message: String,
    pub success: bool,
    pub user: UserData,
}
