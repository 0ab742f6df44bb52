//! Verification lifecycle errors surfaced to callers
//!
//! Expiry and attempt exhaustion are not errors: they are reported as
//! statuses. Only the three conditions below are raised.

use thiserror::Error;
use vm_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};

/// Errors raised by the verification lifecycle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// Confirm referenced an unknown verification id
    #[error("Verification not found")]
    NotFound,

    /// Candidate code did not match; the attempt has already been recorded
    #[error("Invalid code")]
    InvalidCode { remaining_attempts: u32 },

    /// The code could not be delivered and the verification was discarded
    #[error("Failed to send verification email")]
    DeliveryFailed,
}

impl VerificationError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            VerificationError::NotFound => error_codes::VERIFICATION_NOT_FOUND,
            VerificationError::InvalidCode { .. } => error_codes::INVALID_VERIFICATION_CODE,
            VerificationError::DeliveryFailed => error_codes::DELIVERY_FAILED,
        }
    }
}

impl IntoErrorResponse for VerificationError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.error_code(), self.to_string());
        match self {
            VerificationError::InvalidCode { remaining_attempts } => {
                response.add_detail("remaining_attempts", remaining_attempts)
            }
            _ => response,
        }
    }
}

impl From<VerificationError> for ErrorResponse {
    fn from(err: VerificationError) -> Self {
        err.to_error_response()
    }
}
