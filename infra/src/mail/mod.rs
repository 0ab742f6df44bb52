//! Mail module for verification code delivery
//!
//! Two gateways implement [`MailServiceTrait`]:
//! - [`SmtpMailGateway`]: real delivery through an SMTP relay
//! - [`ConsoleMailGateway`]: logs the code, reports itself unconfigured

use std::sync::Arc;

use vm_core::services::verification::MailServiceTrait;
use vm_shared::MailConfig;

pub mod console;
pub mod smtp;
pub mod template;

#[cfg(test)]
mod tests;

pub use console::ConsoleMailGateway;
pub use smtp::SmtpMailGateway;

/// Create the mail gateway for the given configuration
///
/// Falls back to the console gateway when no SMTP settings are present.
/// `code_ttl_minutes` is the lifetime quoted in the email body.
pub fn create_mail_gateway(
    config: Option<MailConfig>,
    code_ttl_minutes: i64,
) -> Arc<dyn MailServiceTrait> {
    match config {
        Some(config) => {
            tracing::info!(
                host = %config.host,
                port = config.port,
                "Using SMTP mail gateway"
            );
            Arc::new(SmtpMailGateway::new(config).with_code_ttl_minutes(code_ttl_minutes))
        }
        None => {
            tracing::warn!("Email not configured, verification codes will be logged and returned");
            Arc::new(ConsoleMailGateway::new())
        }
    }
}
