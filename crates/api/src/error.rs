//! HTTP error mapping. Every error response has the same flat body:
//! `{ "success": false, "error": <status>, "message": <text> }`.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use services::{CategoryServiceError, QuestionServiceError, QuizServiceError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("resource not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("unprocessable: {0}")]
    Unprocessable(String),

    #[error("internal server error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: String,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a failed create/delete: store failures become 422 instead of 500.
    #[must_use]
    pub fn from_mutation(err: QuestionServiceError) -> Self {
        match err {
            QuestionServiceError::Storage(e) => Self::Unprocessable(e.to_string()),
            other => other.into(),
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::BadRequest(detail) => format!("bad request: {detail}"),
            Self::NotFound => "resource not found".to_string(),
            Self::MethodNotAllowed => "method not allowed".to_string(),
            Self::Unprocessable(_) => "unprocessable".to_string(),
            Self::Internal(_) => "internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(detail) => error!(%status, detail, "request failed"),
            Self::Unprocessable(detail) => warn!(%status, detail, "mutation rejected by store"),
            _ => {}
        }

        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<QuestionServiceError> for ApiError {
    fn from(err: QuestionServiceError) -> Self {
        match err {
            QuestionServiceError::NotFound(_) => Self::NotFound,
            QuestionServiceError::Question(e) => Self::BadRequest(e.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<CategoryServiceError> for ApiError {
    fn from(err: CategoryServiceError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<QuizServiceError> for ApiError {
    fn from(err: QuizServiceError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::{QuestionError, QuestionId};

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Unprocessable("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn service_errors_map_by_context() {
        let missing: ApiError = QuestionServiceError::NotFound(QuestionId::new(3)).into();
        assert!(matches!(missing, ApiError::NotFound));

        let invalid: ApiError = QuestionServiceError::Question(QuestionError::EmptyAnswer).into();
        assert!(matches!(invalid, ApiError::BadRequest(_)));

        let read = ApiError::from(QuestionServiceError::Storage(
            storage_error("disk on fire"),
        ));
        assert!(matches!(read, ApiError::Internal(_)));

        let write = ApiError::from_mutation(QuestionServiceError::Storage(storage_error("fk")));
        assert!(matches!(write, ApiError::Unprocessable(_)));
    }

    fn storage_error(msg: &str) -> storage::repository::StorageError {
        storage::repository::StorageError::Connection(msg.to_string())
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let err = ApiError::Internal("password=hunter2".into());
        assert_eq!(err.public_message(), "internal server error");
    }
}
