//! Mapping from crate errors to HTTP responses.
//!
//! Every error body has the shape `{"error": "<message>"}`, except
//! [`ApiError::Status`], which carries no body.

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::SnowNotesError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    PayloadTooLarge(String),
    /// Unexpected failure. The message is passed to the client unchanged.
    Internal(String),
    /// Bare status with an empty body, as axum's own routing errors.
    Status(StatusCode),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Status(status) => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::Internal(msg) => msg,
            ApiError::Status(_) => "",
        }
    }

    /// Body rejections keep 413; everything else a client sent wrong is 400.
    fn rejected(status: StatusCode, body_text: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(body_text)
        } else {
            ApiError::BadRequest(body_text)
        }
    }
}

impl From<SnowNotesError> for ApiError {
    fn from(err: SnowNotesError) -> Self {
        match err {
            SnowNotesError::NoteNotFound(_) => ApiError::NotFound("Note not found".to_string()),
            SnowNotesError::DuplicateCode(_) => {
                ApiError::BadRequest("Code already exists".to_string())
            }
            SnowNotesError::MissingFields
            | SnowNotesError::MissingReplyText
            | SnowNotesError::UnsupportedValue(_) => ApiError::BadRequest(err.to_string()),
            SnowNotesError::Storage(_) | SnowNotesError::Io(_) => {
                tracing::error!(error = %err, "request failed");
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::rejected(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Status(status) = self {
            return status.into_response();
        }
        let body = Json(json!({ "error": self.message() }));
        (self.status(), body).into_response()
    }
}
