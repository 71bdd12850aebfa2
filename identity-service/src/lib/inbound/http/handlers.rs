use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::domain::user::models::Authenticated;
use crate::domain::user::models::User;
use crate::user::errors::AuthError;
use crate::user::errors::ValidationError;

pub mod login;
pub mod register;
pub mod validate_token;

/// Wire-level error for the HTTP surface.
///
/// Every failure body has the shape `{"error": <message>}`. Internal
/// failures keep their detail in the server log and send a fixed generic
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(_) | AuthError::EmailTaken => {
                ApiError::BadRequest(err.to_string())
            }
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::Hashing(_) | AuthError::TokenIssue(_) | AuthError::Store(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Response body shared by Register and Login: the issued token plus the
/// public view of the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub token: String,
    pub user: UserData,
}

impl From<&Authenticated> for AuthResponseData {
    fn from(authenticated: &Authenticated) -> Self {
        Self {
            token: authenticated.token.clone(),
            user: (&authenticated.user).into(),
        }
    }
}

/// Public view of a user; the stored credential is never serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}
