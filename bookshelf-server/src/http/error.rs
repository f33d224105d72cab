//! API error types with IntoResponse
//!
//! Store and validation errors are converted here, once, into status
//! codes and envelopes. Handlers just use `?`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::envelope::{Envelope, ErrorBody};
use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed body or path (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Foreign key violation (409)
    Conflict { detail: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// "author" -> "Author not found"
fn not_found_message(resource: &str) -> String {
    let mut chars = resource.chars();
    match chars.next() {
        Some(first) => format!("{}{} not found", first.to_uppercase(), chars.as_str()),
        None => "not found".to_owned(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Validation(e) => (status, Json(Envelope::fail(e.to_string()))).into_response(),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id = %id, "not found");
                (status, Json(Envelope::fail(not_found_message(resource)))).into_response()
            }
            Self::Conflict { detail } => (status, Json(Envelope::fail(detail))).into_response(),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (status, Json(ErrorBody::internal())).into_response()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::ForeignKey { detail } => Self::Conflict { detail },
            _ => Self::Database(e),
        }
    }
}
