pub mod verification;

pub use verification::{InMemoryVerificationRepository, VerificationRepository};
