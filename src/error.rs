//! Errors surfaced by request handlers, converted to JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::forms::FieldErrors;

#[derive(Debug, Error)]
pub enum AppError {
    /// Request body could not be read as a form (422)
    #[error("invalid form submission")]
    Validation(FieldErrors),

    /// No record with the requested id (404)
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    /// Database failure on a read path (500, logged)
    #[error("database error: {0}")]
    Persistence(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "validation_error",
                    "message": self.to_string(),
                    "errors": errors,
                }),
            ),
            Self::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": self.to_string(),
                }),
            ),
            Self::Persistence(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Whether a failed write was refused by a schema constraint rather than
/// lost to an infrastructure problem.
pub fn is_integrity_violation(error: &sqlx::Error) -> bool {
    use sqlx::error::ErrorKind;

    match error {
        sqlx::Error::Database(db) => matches!(
            db.kind(),
            ErrorKind::ForeignKeyViolation
                | ErrorKind::UniqueViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn not_found_is_404() {
        let response = AppError::not_found("venue", 42).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "venue '42' not found");
    }

    #[tokio::test]
    async fn validation_error_lists_fields() {
        let err = AppError::Validation(FieldErrors::single("form", "Body is not valid form data."));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["errors"]["form"][0], "Body is not valid form data.");
    }

    #[tokio::test]
    async fn database_error_hides_detail() {
        let response = AppError::from(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn non_database_errors_are_not_integrity_violations() {
        assert!(!is_integrity_violation(&sqlx::Error::PoolTimedOut));
        assert!(!is_integrity_violation(&sqlx::Error::RowNotFound));
    }
}
