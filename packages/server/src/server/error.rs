//! HTTP error responses.
//!
//! Every failure leaves the service as `{"error": "<message>"}` with a status
//! that says whose fault it was.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pii::PiiError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body missing, not JSON, `null`, or an empty object
    #[error("No JSON data provided")]
    NoJsonData,

    #[error("{0}")]
    BadRequest(String),

    #[error("Too many requests, retry in {wait_time}s")]
    TooManyRequests { wait_time: u64 },

    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoJsonData | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PiiError> for ApiError {
    fn from(err: PiiError) -> Self {
        if err.is_client_error() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<PiiError>() {
            Ok(pii_err) => pii_err.into(),
            Err(other) => ApiError::Internal(format!("{:#}", other)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Rejected request");
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
