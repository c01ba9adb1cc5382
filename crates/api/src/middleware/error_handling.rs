//! # Error Handling Middleware
//!
//! Maps domain-specific errors to HTTP status codes and JSON error
//! responses, so every endpoint reports failures the same way.
//!
//! The one mapping that matters for correctness is `Conflict` to 409: a
//! caller that loses the slot-allocation race needs to tell that apart from
//! a generic failure so it can re-fetch the next free slot and retry.

use agenda_core::errors::AgendaError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain `AgendaError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub AgendaError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            AgendaError::NotFound(_) => StatusCode::NOT_FOUND,
            AgendaError::Validation(_) => StatusCode::BAD_REQUEST,
            AgendaError::Conflict(_) => StatusCode::CONFLICT,
            AgendaError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AgendaError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AgendaError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Allows using `?` with functions returning `Result<T, AgendaError>` inside
/// handlers that return `Result<T, AppError>`.
impl From<AgendaError> for AppError {
    fn from(err: AgendaError) -> Self {
        AppError(err)
    }
}

/// Wraps raw store-layer reports as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(AgendaError::Database(err))
    }
}
