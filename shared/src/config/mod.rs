//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection settings for the shared verification store
//! - `environment` - Environment detection and logging configuration
//! - `mail` - SMTP delivery settings
//! - `server` - HTTP server and CORS configuration
//! - `verification` - Code lifetime, attempt limits and delivery policy

pub mod cache;
pub mod environment;
pub mod mail;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::MailConfig;
pub use server::{CorsConfig, ServerConfig};
pub use verification::{StoreBackend, VerificationConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// SMTP configuration, absent when mail delivery is not set up
    #[serde(default)]
    pub mail: Option<MailConfig>,

    /// Verification policy
    pub verification: VerificationConfig,

    /// Redis configuration (used when the store backend is `redis`)
    #[serde(default)]
    pub cache: CacheConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Baseline configuration for an environment, without reading variables
    pub fn for_environment(environment: Environment) -> Self {
        let cors = if environment.is_production() {
            CorsConfig::default()
        } else {
            CorsConfig::development()
        };

        Self {
            environment,
            server: ServerConfig::default(),
            mail: None,
            verification: VerificationConfig::for_environment(environment),
            cache: CacheConfig::default(),
            cors,
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut config = Self::for_environment(environment);

        config.server = ServerConfig::from_env();
        config.mail = MailConfig::from_env();
        config.verification = VerificationConfig::from_env(environment);
        config.cache = CacheConfig::from_env();
        config.cors = CorsConfig::from_env(environment);
        config.logging = LoggingConfig::from_env(environment);

        config
    }

    /// Whether a real mail transport is available
    pub fn is_mail_configured(&self) -> bool {
        self.mail.is_some()
    }
}

/// Read a variable, treating empty values as missing
pub(crate) fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Read and parse a variable, falling back to `default` when missing or malformed
pub(crate) fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    non_empty_var(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_defaults() {
        let config = AppConfig::for_environment(Environment::Development);
        assert!(config.verification.development_mode);
        assert!(!config.is_mail_configured());
        assert_eq!(config.cors.allowed_origins, vec!["*"]);
    }

    #[test]
    fn test_production_defaults() {
        let config = AppConfig::for_environment(Environment::Production);
        assert!(!config.verification.development_mode);
        assert!(config.cors.allowed_origins.is_empty());
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
