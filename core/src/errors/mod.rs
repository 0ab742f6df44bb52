//! Domain-specific error types and error handling.

mod types;


pub use types::VerificationError;

use thiserror::Error;
use vm_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to verification lifecycle errors
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl DomainError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Verification(err) => err.error_code(),
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Verification(err) => err.to_error_response(),
            // Internal details stay in the logs
            DomainError::Internal { .. } => {
                ErrorResponse::new(self.error_code(), "An internal error occurred")
            }
            _ => ErrorResponse::new(self.error_code(), self.to_string()),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
