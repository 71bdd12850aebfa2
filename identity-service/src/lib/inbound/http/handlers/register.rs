use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::AuthResponseData;
use crate::domain::user::models::require_field;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::ValidationError;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponseData>), ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref authenticated| (StatusCode::OK, Json(authenticated.into())))
}

/// HTTP request body for registration (raw JSON).
///
/// Absent fields deserialize as empty strings and are rejected by field
/// validation, not by body deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ValidationError> {
        let email = EmailAddress::new(self.email)?;
        let password = require_field("Password", self.password)?;
        let first_name = require_field("First name", self.first_name)?;
        let last_name = require_field("Last name", self.last_name)?;
        Ok(RegisterCommand::new(email, password, first_name, last_name))
    }
}
