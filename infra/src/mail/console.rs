//! Console mail gateway for development

use async_trait::async_trait;

use vm_core::services::verification::MailServiceTrait;
use vm_shared::utils::mask_email;

/// Gateway that logs codes instead of sending them
///
/// Reports itself as unconfigured, so the verification service returns the
/// code to the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMailGateway;

impl ConsoleMailGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailServiceTrait for ConsoleMailGateway {
    fn is_configured(&self) -> bool {
        false
    }

    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String> {
        tracing::info!(
            email = %mask_email(email),
            code = %code,
            "Verification code (console delivery)"
        );
        Ok(())
    }
}
