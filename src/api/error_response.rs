//! Conversion of relay errors into JSON HTTP responses.

use crate::utils::error::RelayError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// JSON error body: `{"message": "...", "code": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub message: String,
    pub code: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

impl From<&RelayError> for ApiError {
    fn from(error: &RelayError) -> Self {
        Self::new(error.error_code(), error.to_string())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status_code, Json(ApiError::from(&self))).into_response()
    }
}
