//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the verification service
//! consumes through traits:
//! - **Cache**: Redis client and a Redis-backed verification store
//! - **Mail**: SMTP delivery via lettre, plus a console fallback
//!
//! Both are optional at runtime. Without Redis the in-memory store from
//! `vm_core` is used; without SMTP settings the console gateway is used.

// Re-export core types for convenience
pub use vm_core::errors::*;

/// Cache module - Redis client and verification store
pub mod cache;

/// Mail module - Verification code delivery
pub mod mail;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Mail transport or message building error
    #[error("Mail error: {0}")]
    Mail(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
