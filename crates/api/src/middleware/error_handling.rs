//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies so every
//! endpoint reports failures the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use shiftswap_core::errors::ShiftError;
use tracing::error;

/// Message returned for failures whose details stay in the server log.
pub const GENERIC_FAILURE_MESSAGE: &str = "could not complete operation";

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use shiftswap_api::middleware::error_handling::AppError;
/// use shiftswap_core::errors::ShiftError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(ShiftError::NotFound("week 2024-05-12".into())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ShiftError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ShiftError::NotFound(_) => StatusCode::NOT_FOUND,
            ShiftError::Validation(_) | ShiftError::Matrix(_) => StatusCode::BAD_REQUEST,
            ShiftError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ShiftError::Authorization(_) => StatusCode::FORBIDDEN,
            ShiftError::Conflict(_) => StatusCode::CONFLICT,
            ShiftError::Database(_) | ShiftError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage and internal failures are logged, never echoed to the client
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "Request failed");
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            self.0.to_string()
        };
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Lets handlers use `?` on `ShiftResult` values.
impl From<ShiftError> for AppError {
    fn from(err: ShiftError) -> Self {
        AppError(err)
    }
}

/// Wraps storage errors as `ShiftError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ShiftError::Database(err))
    }
}
