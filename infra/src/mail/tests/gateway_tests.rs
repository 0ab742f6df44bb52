//! Unit tests for mail gateways

use vm_core::services::verification::MailServiceTrait;
use vm_shared::MailConfig;

use crate::mail::{create_mail_gateway, ConsoleMailGateway, SmtpMailGateway};

fn smtp_config() -> MailConfig {
    let mut config = MailConfig::new("smtp.example.com", "mailer@example.com", "secret");
    config.from_name = "VeriMail".to_string();
    config
}

#[tokio::test]
async fn test_console_gateway_is_unconfigured_and_succeeds() {
    let gateway = ConsoleMailGateway::new();

    assert!(!gateway.is_configured());
    assert!(gateway
        .send_verification_code("user@example.com", "482913")
        .await
        .is_ok());
}

#[test]
fn test_factory_without_config_uses_console() {
    let gateway = create_mail_gateway(None, 10);
    assert!(!gateway.is_configured());
}

#[test]
fn test_factory_with_config_uses_smtp() {
    let gateway = create_mail_gateway(Some(smtp_config()), 10);
    assert!(gateway.is_configured());
}

#[test]
fn test_build_message_headers_and_body() {
    let gateway = SmtpMailGateway::new(smtp_config());

    let message = gateway.build_message("user@example.com", "482913").unwrap();
    let formatted = String::from_utf8_lossy(&message.formatted()).to_string();

    assert!(formatted.contains("Subject: Verify Your Email Address"));
    assert!(formatted.contains("To: user@example.com"));
    assert!(formatted.contains("VeriMail"));
    assert!(formatted.contains("mailer@example.com"));
    assert!(formatted.contains("multipart/alternative"));
    assert!(formatted.contains("482913"));
}

#[test]
fn test_body_quotes_configured_lifetime() {
    let gateway = SmtpMailGateway::new(smtp_config()).with_code_ttl_minutes(3);

    let message = gateway.build_message("user@example.com", "482913").unwrap();
    let formatted = String::from_utf8_lossy(&message.formatted()).to_string();
    assert!(formatted.contains("expires in 3 minutes"));
}

#[tokio::test]
async fn test_invalid_recipient_fails_before_connecting() {
    let gateway = SmtpMailGateway::new(smtp_config());

    let result = gateway.send_verification_code("not an address", "482913").await;
    let error = result.unwrap_err();
    assert!(error.contains("Invalid to address"));
}

#[tokio::test]
async fn test_invalid_sender_fails() {
    let mut config = smtp_config();
    config.from_email = "broken".to_string();
    let gateway = SmtpMailGateway::new(config);

    let result = gateway.send_verification_code("user@example.com", "482913").await;
    assert!(result.unwrap_err().contains("Invalid from address"));
}
