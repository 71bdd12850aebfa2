use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::AuthResponseData;
use crate::domain::user::models::require_field;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::ValidationError;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<(StatusCode, Json<AuthResponseData>), ApiError> {
    state
        .auth_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref authenticated| (StatusCode::OK, Json(authenticated.into())))
}

/// HTTP request body for login (raw JSON).
///
/// Absent fields deserialize as empty strings and are rejected by field
/// validation, not by body deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ValidationError> {
        let email = EmailAddress::new(self.email)?;
        let password = require_field("Password", self.password)?;
        Ok(LoginCommand::new(email, password))
    }
}
