//! Configuration for the verification service

use vm_shared::config::verification::{DEFAULT_CODE_TTL_MINUTES, DEFAULT_MAX_ATTEMPTS};
use vm_shared::VerificationConfig;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Wrong codes accepted before a verification fails
    pub max_attempts: u32,
    /// Return the code inline when a configured gateway fails to send
    pub development_mode: bool,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_CODE_TTL_MINUTES,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            development_mode: false,
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_expiration_minutes: config.code_ttl_minutes,
            max_attempts: config.max_attempts,
            development_mode: config.development_mode,
        }
    }
}
