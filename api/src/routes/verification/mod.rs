//! Verification route handlers
//!
//! - `POST /verification/request` issues a code for an email address
//! - `POST /verification/confirm` checks a code against a verification id

pub mod confirm;
pub mod request;

use std::sync::Arc;

use vm_core::services::verification::VerificationService;

pub use confirm::confirm_verification;
pub use request::request_verification;

/// Application state that holds shared services
pub struct AppState<R: ?Sized, M: ?Sized> {
    pub verification_service: Arc<VerificationService<R, M>>,
}

impl<R: ?Sized, M: ?Sized> AppState<R, M> {
    pub fn new(verification_service: Arc<VerificationService<R, M>>) -> Self {
        Self {
            verification_service,
        }
    }
}
