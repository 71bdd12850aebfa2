use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use crate::domain::user::models::TokenIdentity;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn validate_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<ValidateTokenResponseData>), ApiError> {
    // A missing or non-text header value validates the same as an empty one
    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    state
        .auth_service
        .validate_token(header_value)
        .map_err(ApiError::from)
        .map(|ref identity| (StatusCode::OK, Json(identity.into())))
}

/// Response body for a successfully validated token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenResponseData {
    pub valid: bool,
    pub user_id: String,
    pub email: String,
}

impl From<&TokenIdentity> for ValidateTokenResponseData {
    fn from(identity: &TokenIdentity) -> Self {
        Self {
            valid: true,
            user_id: identity.user_id.to_string(),
            email: identity.email.clone(),
        }
    }
}
