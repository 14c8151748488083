//! Repository Module
//!
//! CRUD operations over the SQLite pool, one free-function module per table.

pub mod booking;
pub mod restaurant;

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violated; carries the public field name
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// List query mentions an unknown field or an ill-typed value
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return RepoError::Duplicate(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return RepoError::Validation(db_err.message().to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(field) => {
                AppError::validation(format!("Duplicate field value: {field}"))
                    .with_detail("field", field)
            }
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::InvalidQuery(msg) => AppError::invalid_request(msg),
            RepoError::Database(msg) => {
                // store details stay in the log
                tracing::error!(error = %msg, "Store operation failed");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
