//! Mapping from crate errors to HTTP responses

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::Error;

/// Error returned by every handler, rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    /// A failed insert/update/delete. Storage failures surface as 400.
    pub fn write(err: Error) -> Self {
        Self::classify(err, StatusCode::BAD_REQUEST)
    }

    /// A failed read or bulk reset. Storage failures surface as 500.
    pub fn read(err: Error) -> Self {
        Self::classify(err, StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn classify(err: Error, fallback: StatusCode) -> Self {
        let status = match &err {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => fallback,
        };

        if status.is_server_error() {
            tracing::error!(error = %err, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %err, "Request rejected");
        }

        Self::new(status, err.to_string())
    }

    /// Malformed body or query string.
    fn rejected(message: String) -> Self {
        tracing::warn!(status = %StatusCode::BAD_REQUEST, error = %message, "Request rejected");
        Self::bad_request(message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::rejected(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::rejected(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.message,
        }));
        (self.status, body).into_response()
    }
}
