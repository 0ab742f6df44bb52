//! SMTP mail configuration

use serde::{Deserialize, Serialize};

use super::{non_empty_var, parse_var};

/// Port on which SMTP uses implicit TLS; every other port negotiates STARTTLS
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP delivery configuration
///
/// Only built when host, user and password are all present; a missing value
/// means mail delivery is not configured at all.
#[derive(Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// SMTP server host
    pub host: String,

    /// SMTP server port (465 implicit TLS, 587 STARTTLS)
    #[serde(default = "default_port")]
    pub port: u16,

    /// SMTP username
    pub username: String,

    /// SMTP password
    pub password: String,

    /// Sender address
    pub from_email: String,

    /// Display name of the sender
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl MailConfig {
    /// Create config from EMAIL_HOST, EMAIL_PORT, EMAIL_USER, EMAIL_PASSWORD,
    /// EMAIL_FROM and EMAIL_FROM_NAME
    pub fn from_env() -> Option<Self> {
        let host = non_empty_var("EMAIL_HOST")?;
        let username = non_empty_var("EMAIL_USER")?;
        let password = non_empty_var("EMAIL_PASSWORD")?;

        let from_email = non_empty_var("EMAIL_FROM").unwrap_or_else(|| username.clone());
        let from_name = non_empty_var("EMAIL_FROM_NAME").unwrap_or_else(default_from_name);

        Some(Self {
            host,
            port: parse_var("EMAIL_PORT", default_port()),
            username,
            password,
            from_email,
            from_name,
        })
    }

    /// Create a configuration with default port and sender name
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let username = username.into();
        Self {
            host: host.into(),
            port: default_port(),
            from_email: username.clone(),
            username,
            password: password.into(),
            from_name: default_from_name(),
        }
    }

    /// Whether the connection starts with TLS instead of upgrading via STARTTLS
    pub fn uses_implicit_tls(&self) -> bool {
        self.port == IMPLICIT_TLS_PORT
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .finish()
    }
}

fn default_port() -> u16 {
    587
}

fn default_from_name() -> String {
    String::from("Email Verification")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_sender_to_username() {
        let config = MailConfig::new("smtp.example.com", "mailer@example.com", "secret");
        assert_eq!(config.port, 587);
        assert_eq!(config.from_email, "mailer@example.com");
        assert_eq!(config.from_name, "Email Verification");
        assert!(!config.uses_implicit_tls());
    }

    #[test]
    fn test_implicit_tls_port() {
        let mut config = MailConfig::new("smtp.example.com", "mailer@example.com", "secret");
        config.port = 465;
        assert!(config.uses_implicit_tls());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = MailConfig::new("smtp.example.com", "mailer@example.com", "hunter2");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
