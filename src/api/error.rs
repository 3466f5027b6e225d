//! Failure to response mapping

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::{Error, ErrorKind};
use crate::models::ErrorResponse;

/// An error on its way to the client as `{"messages": [...]}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    messages: Vec<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            messages: vec![message.into()],
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn invalid_body(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        Self::bad_request("Invalid request body")
    }

    /// Several validation failures reported together.
    pub fn validation(errors: Vec<Error>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            messages: errors.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        if err.is_proxy_failure() {
            return Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to execute request: {err}"),
            );
        }

        match err.kind() {
            ErrorKind::NotFound => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            ErrorKind::Validation => Self::bad_request(err.to_string()),
            _ => {
                tracing::error!(error = %err, "Storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse::with_messages(self.messages)),
        )
            .into_response()
    }
}
