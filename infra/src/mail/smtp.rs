//! SMTP mail gateway for production

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tokio::sync::OnceCell;

use vm_core::services::verification::MailServiceTrait;
use vm_shared::config::verification::DEFAULT_CODE_TTL_MINUTES;
use vm_shared::utils::mask_email;
use vm_shared::MailConfig;

use super::template::{render_html, render_text, VERIFICATION_SUBJECT};
use crate::InfrastructureError;

type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

/// Gateway delivering verification codes through an SMTP relay
///
/// The transport is built on first send, so a bad host only surfaces as a
/// delivery failure and never prevents startup.
pub struct SmtpMailGateway {
    config: MailConfig,
    code_ttl_minutes: i64,
    transport: OnceCell<SmtpTransport>,
}

impl SmtpMailGateway {
    /// Create a gateway; no connection is made until the first send
    pub fn new(config: MailConfig) -> Self {
        Self {
            config,
            code_ttl_minutes: DEFAULT_CODE_TTL_MINUTES,
            transport: OnceCell::new(),
        }
    }

    /// Set the lifetime quoted in the email body
    pub fn with_code_ttl_minutes(mut self, minutes: i64) -> Self {
        self.code_ttl_minutes = minutes;
        self
    }

    fn build_transport(config: &MailConfig) -> Result<SmtpTransport, InfrastructureError> {
        let builder = if config.uses_implicit_tls() {
            SmtpTransport::relay(&config.host)
        } else {
            SmtpTransport::starttls_relay(&config.host)
        }
        .map_err(|e| InfrastructureError::Mail(format!("Failed to create SMTP transport: {}", e)))?;

        Ok(builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build())
    }

    async fn transport(&self) -> Result<&SmtpTransport, InfrastructureError> {
        self.transport
            .get_or_try_init(|| async { Self::build_transport(&self.config) })
            .await
    }

    /// Build the multipart verification message
    pub(crate) fn build_message(&self, to: &str, code: &str) -> Result<Message, InfrastructureError> {
        let from_address = self
            .config
            .from_email
            .parse::<Address>()
            .map_err(|e| InfrastructureError::Mail(format!("Invalid from address: {}", e)))?;
        let from = Mailbox::new(Some(self.config.from_name.clone()), from_address);

        let to = to
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Mail(format!("Invalid to address: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(VERIFICATION_SUBJECT)
            .multipart(MultiPart::alternative_plain_html(
                render_text(code, self.code_ttl_minutes),
                render_html(code, self.code_ttl_minutes, &self.config.from_name),
            ))
            .map_err(|e| InfrastructureError::Mail(format!("Failed to build email: {}", e)))
    }

    async fn send(&self, to: &str, code: &str) -> Result<(), InfrastructureError> {
        let message = self.build_message(to, code)?;
        let transport = self.transport().await?;

        transport
            .send(message)
            .await
            .map_err(|e| InfrastructureError::Mail(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl MailServiceTrait for SmtpMailGateway {
    fn is_configured(&self) -> bool {
        true
    }

    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String> {
        self.send(email, code).await.map_err(|e| e.to_string())?;

        tracing::info!(
            email = %mask_email(email),
            host = %self.config.host,
            "Verification email sent"
        );
        Ok(())
    }
}
