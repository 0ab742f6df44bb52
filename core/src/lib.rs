//! # VeriMail Core
//!
//! Core business logic for email one-time code verification.
//! This crate contains the verification record entity, the lifecycle
//! service that owns the request/confirm state machine, repository
//! interfaces with an in-memory implementation, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{VerificationRecord, VerificationStatus, CODE_LENGTH};
pub use errors::{DomainError, DomainResult, VerificationError};
pub use repositories::{InMemoryVerificationRepository, VerificationRepository};
pub use services::{
    ConfirmVerificationResult, MailServiceTrait, RequestVerificationResult, VerificationService,
    VerificationServiceConfig,
};
