//! Verification service module for email one-time code verification
//!
//! This module owns the verification lifecycle:
//! - Code generation and record creation
//! - Delivery through a mail gateway with a development fallback
//! - Confirmation with expiry, attempt limiting and terminal states
//! - Per-record serialization of confirm calls

mod code_generator;
mod config;
mod record_locks;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use code_generator::{generate_code, CODE_MAX, CODE_MIN};
pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::MailServiceTrait;
pub use types::{ConfirmVerificationResult, RequestVerificationResult};
