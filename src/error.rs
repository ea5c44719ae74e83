use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::auth::LOGIN_PATH;

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Invalid input provided by the client, such as a malformed id.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Request body failed validation; every problem is listed.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Caller is not (or could not be) authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// A collaborator needed for the operation is not configured or reachable.
    #[error("unavailable: {0}")]
    Unavailable(String),
    /// Storage did not acknowledge the operation or failed; the message is safe to show.
    #[error("operation failed: {0}")]
    OperationFailed(String),
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Request body failed validation.
    #[error("validation failed")]
    Validation(Vec<String>),
    /// Unauthorized access attempt.
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Client facing explanation.
        message: String,
        /// Where to start a login, when one would help.
        login_url: Option<&'static str>,
    },
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Service unavailable or not configured.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Internal server error; the message never carries backend details.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Rejection used by the session gate.
    pub fn login_required() -> Self {
        AppError::Unauthorized {
            message: "Unauthorized. Please log in to access this resource.".into(),
            login_url: Some(LOGIN_PATH),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::Validation(errors) => AppError::Validation(errors),
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::Unauthorized(message) => AppError::Unauthorized {
                message,
                login_url: Some(LOGIN_PATH),
            },
            ServiceError::Unavailable(message) => AppError::ServiceUnavailable(message),
            ServiceError::OperationFailed(message) => AppError::Internal(message),
        }
    }
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Client facing summary.
    pub message: String,
    /// Every validation problem, present on validation failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Where to start a login, present on authentication failures only.
    #[serde(rename = "loginUrl", skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        let body = match self {
            AppError::Validation(errors) => ErrorBody {
                message: "Validation failed".into(),
                errors: Some(errors),
                login_url: None,
            },
            AppError::Unauthorized { message, login_url } => ErrorBody {
                message,
                errors: None,
                login_url: login_url.map(str::to_owned),
            },
            AppError::BadRequest(message)
            | AppError::NotFound(message)
            | AppError::ServiceUnavailable(message)
            | AppError::Internal(message) => ErrorBody {
                message,
                errors: None,
                login_url: None,
            },
        };

        (status, Json(body)).into_response()
    }
}
