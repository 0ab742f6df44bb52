//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    generate_code, ConfirmVerificationResult, MailServiceTrait, RequestVerificationResult,
    VerificationService, VerificationServiceConfig,
};
