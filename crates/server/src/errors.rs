use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use common::types::Detail;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use service::validation::{ValidationErrors, NON_FIELD_ERRORS};

/// Every failure a handler can return, rendered as a JSON body.
#[derive(Debug)]
pub enum ApiError {
    /// 400 with the field -> messages map
    Validation(ValidationErrors),
    /// 400 with a `detail` message
    BadRequest(String),
    Unauthorized(String),
    NotFound,
    UnsupportedMediaType(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Json(Detail::new(msg))).into_response(),
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, r#"Bearer realm="api""#)],
                Json(Detail::new(msg)),
            )
                .into_response(),
            ApiError::NotFound => (StatusCode::NOT_FOUND, Json(Detail::new("Not found."))).into_response(),
            ApiError::UnsupportedMediaType(msg) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, Json(Detail::new(msg))).into_response()
            }
            ApiError::Internal(msg) => {
                error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(Detail::new("A server error occurred."))).into_response()
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self { ApiError::Validation(e) }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errors) => ApiError::Validation(errors),
            ServiceError::NotFound(_) => ApiError::NotFound,
            ServiceError::Db(msg) => ApiError::Internal(msg),
            ServiceError::Model(m) => ApiError::Internal(m.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingCredentials | AuthError::InvalidToken | AuthError::Inactive => {
                ApiError::Unauthorized(e.to_string())
            }
            AuthError::InvalidCredentials => {
                ApiError::Validation(ValidationErrors::single(NON_FIELD_ERRORS, e.to_string()))
            }
            AuthError::TokenError(_) | AuthError::Repository(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::UnsupportedMediaType("Unsupported media type in request; expected application/json.".into())
            }
            other => ApiError::BadRequest(format!("JSON parse error - {}", other.body_text())),
        }
    }
}
