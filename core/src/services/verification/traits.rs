//! Trait for mail delivery integration

use async_trait::async_trait;

/// Trait for delivering verification codes by email
#[async_trait]
pub trait MailServiceTrait: Send + Sync {
    /// Whether a real transport is available
    ///
    /// An unconfigured gateway still accepts sends, but the service treats
    /// it as a development fallback and returns the code to the caller.
    fn is_configured(&self) -> bool;

    /// Send a verification code to an email address
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String>;
}
