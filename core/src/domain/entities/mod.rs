//! Domain entities representing core business objects.

pub mod verification;

pub use verification::{VerificationRecord, VerificationStatus, CODE_LENGTH};
