//! JSON envelopes and the mapping from AppError to HTTP status codes.

use crate::errors::AppError;
use crate::models::debtor::Debtor;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

/// `{ "success": true }`
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// Successful lookup: `{ "success": true, "debtor": {...} }`
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub debtor: Debtor,
}

/// Uniform failure body: `{ "success": false, "message": "..." }`
#[derive(Debug, Serialize)]
pub struct Failure {
    pub success: bool,
    pub message: String,
}

impl AppError {
    /// HTTP status for this error.
    ///
    /// - Validation: 400
    /// - NotFound: 404
    /// - Unauthorized: 401
    /// - everything else (store, io, ...): 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = Failure {
            success: false,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
