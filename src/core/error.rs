use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // An unknown student is a problem with the submitted payload
            AppError::NotFound(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Split a store failure into its message and, when the driver reports one,
/// the SQLSTATE code.
fn describe_database_error(e: &sqlx::Error) -> (String, Option<String>) {
    match e {
        sqlx::Error::Database(db) => (db.message().to_string(), db.code().map(|c| c.into_owned())),
        other => (other.to_string(), None),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                let (message, code) = describe_database_error(e);
                ErrorResponse::new(message).with_code(code)
            }
            AppError::Validation(msg) => ErrorResponse::new(msg.clone()).with_errors(vec![msg]),
            AppError::NotFound(msg) | AppError::BadRequest(msg) => ErrorResponse::new(msg),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
