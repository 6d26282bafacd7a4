use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use crate::repository::RepositoryError;

/// Errors surfaced by the HTTP layer. Each one renders as
/// `{"error": <status>, "message": <code>}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("ContentTypeNotSupported")]
    ContentTypeNotSupported,

    #[error("InvalidBody")]
    InvalidBody,

    #[error("UserNotFound")]
    UserNotFound,

    #[error("InternalServerError")]
    Internal(#[source] RepositoryError),
}

#[derive(Debug, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body
    pub error: u16,
    pub message: String,
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidIdentifier(id) => {
                log::debug!("Rejecting malformed user id '{}'", id);
                ApiError::UserNotFound
            }
            other => ApiError::Internal(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ContentTypeNotSupported | ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(source) = self {
            log::error!("❌ Store operation failed: {}", source);
        }

        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: status.as_u16(),
            message: self.to_string(),
        })
    }
}
