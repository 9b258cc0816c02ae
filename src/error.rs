//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. Each variant is a distinct failure kind with a distinct client
//! outcome: registration conflicts, failed logins, rejected tokens, missing or
//! unowned records, invalid input, and opaque infrastructure failures.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can
//! return `Result<_, AppError>` and have failures translated into HTTP
//! responses with JSON bodies. `StorageFailure` and `Internal` are the only
//! kinds whose detail stays server-side: the message goes to the error log,
//! the client gets a generic body.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Registration conflict: the username is already taken (HTTP 409).
    /// Raised from the store's unique-constraint violation, never from a
    /// separate existence check.
    DuplicateIdentity(String),
    /// Login failure (HTTP 401). Carries no message beyond "Invalid
    /// credentials": an unknown username and a wrong password are
    /// indistinguishable to the caller.
    InvalidCredentials,
    /// The request carried no usable identity token, or the token's subject
    /// no longer resolves to a stored identity (HTTP 401).
    Unauthorized(String),
    /// A requested record does not exist, or is not owned by the caller.
    /// The two cases are indistinguishable (HTTP 404).
    NotFound(String),
    /// Represents an error due to failed input validation (HTTP 422 Unprocessable Entity).
    /// Wraps errors from the `validator` crate.
    ValidationError(String),
    /// Represents an error originating from the data store (HTTP 500).
    /// The message is logged server-side and never reaches the client.
    StorageFailure(String),
    /// An unexpected infrastructure error, e.g. a hashing or token-signing
    /// failure (HTTP 500). Logged server-side, generic to the client.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::DuplicateIdentity(msg) => write!(f, "Duplicate identity: {}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::StorageFailure(msg) => write!(f, "Storage Failure: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This is the single place where failure kinds map to transport-level
/// status codes and response bodies.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::DuplicateIdentity(msg) => HttpResponse::Conflict().json(json!({
                "error": msg
            })),
            AppError::InvalidCredentials => HttpResponse::Unauthorized().json(json!({
                "error": "Invalid credentials"
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::ValidationError(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "error": msg
            })),
            // Store and infrastructure failures keep their detail in the log
            // and present a generic internal error to the client.
            AppError::StorageFailure(msg) => {
                log::error!("storage failure: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
            AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `AppError::NotFound` (a scoped query matched
/// nothing), while other database errors become `AppError::StorageFailure`.
/// Unique-constraint violations are matched where they carry meaning
/// (registration) before this blanket conversion applies.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::StorageFailure(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
///
/// This handles errors during password hashing or verification.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
