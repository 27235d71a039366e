use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::constants::{ERR_DATABASE_OPERATION, ERR_DEBT_NOT_FOUND};

/// Failures of the debt data-access layer.
#[derive(Debug, Error)]
pub enum DebtError {
    /// Malformed or missing input, caught before any database call.
    #[error("{0}")]
    Validation(String),

    #[error("Debt not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Store(#[from] libsql::Error),

    #[error("Stored debt is malformed: {0}")]
    Decode(String),

    #[error("QR encoding failed: {0}")]
    Qr(String),
}

impl DebtError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DebtError::Validation(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl From<DebtError> for AppError {
    fn from(err: DebtError) -> Self {
        match err {
            DebtError::Validation(msg) => AppError::BadRequest(msg),
            DebtError::NotFound(_) => AppError::NotFound(ERR_DEBT_NOT_FOUND.to_string()),
            DebtError::Store(e) => {
                error!(error = %e, "debt store operation failed");
                AppError::Internal(ERR_DATABASE_OPERATION.to_string())
            }
            DebtError::Decode(msg) => {
                error!(error = %msg, "debt row could not be decoded");
                AppError::Internal(ERR_DATABASE_OPERATION.to_string())
            }
            DebtError::Qr(msg) => {
                error!(error = %msg, "qr rendering failed");
                AppError::Internal(msg)
            }
        }
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        error!(error = %err, "session store failure");
        AppError::Internal(crate::constants::ERR_INVALID_SESSION.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
