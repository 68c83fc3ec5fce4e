//! HTTP surface of the bookshelf.
//!
//! Every response body is an envelope with a `status` discriminator:
//! `success`, `fail` for client errors and `error` for server errors.

pub mod handlers;

use crate::core::BookError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
    Error,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize = ()> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: Some(message.into()),
            data: None,
        }
    }

    fn failure(status: ResponseStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

#[derive(Debug)]
pub enum WebError {
    Book(BookError),
    /// Request could not be decoded.
    Input(String),
}

impl From<BookError> for WebError {
    fn from(err: BookError) -> Self {
        WebError::Book(err)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        WebError::Input(rejection.body_text())
    }
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::Book(BookError::Validation(_)) | WebError::Input(_) => {
                StatusCode::BAD_REQUEST
            }
            WebError::Book(BookError::NotFound(_)) => StatusCode::NOT_FOUND,
            WebError::Book(BookError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            WebError::Book(err) => err.message().to_string(),
            WebError::Input(msg) => msg,
        };

        let kind = if status.is_server_error() {
            error!(%status, %message, "request failed");
            ResponseStatus::Error
        } else {
            debug!(%status, %message, "request rejected");
            ResponseStatus::Fail
        };

        (status, Json(ApiResponse::failure(kind, message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, WebError>;
