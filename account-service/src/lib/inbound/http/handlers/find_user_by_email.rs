use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Resolves an email address to the owning user's id.
pub async fn find_user_by_email(
    State(state): State<AppState>,
    Json(body): Json<FindUserByEmailRequest>,
) -> Result<ApiSuccess<FindUserByEmailResponseData>, ApiError> {
    let email = EmailAddress::new(body.email).map_err(UserError::from)?;

    state
        .user_service
        .get_user_by_email(&email)
        .await
        .map_err(ApiError::from)
        .map(|user| {
            ApiSuccess::new(
                StatusCode::ACCEPTED,
                FindUserByEmailResponseData {
                    user_id: user.id.to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FindUserByEmailRequest {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindUserByEmailResponseData {
    pub user_id: String,
}
