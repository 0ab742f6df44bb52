//! Verification policy configuration

use serde::{Deserialize, Serialize};

use super::{non_empty_var, parse_var, Environment};

/// Default lifetime of a verification code
pub const DEFAULT_CODE_TTL_MINUTES: i64 = 10;

/// Longest accepted code lifetime (one day)
pub const MAX_CODE_TTL_MINUTES: i64 = 24 * 60;

/// Default number of wrong codes accepted before a verification fails
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Backing store for verification records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local map
    #[default]
    Memory,
    /// Shared Redis instance
    Redis,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

/// Verification policy settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes before a code expires
    #[serde(default = "default_ttl")]
    pub code_ttl_minutes: i64,

    /// Wrong codes allowed before the verification fails
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Return the code to the caller when delivery fails instead of failing the request
    #[serde(default)]
    pub development_mode: bool,

    /// Where verification records live
    #[serde(default)]
    pub store: StoreBackend,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: DEFAULT_CODE_TTL_MINUTES,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            development_mode: false,
            store: StoreBackend::Memory,
        }
    }
}

impl VerificationConfig {
    /// Defaults for an environment; development mode is only on in development
    pub fn for_environment(env: Environment) -> Self {
        Self {
            development_mode: env.is_development(),
            ..Default::default()
        }
    }

    /// Environment defaults, overridden by VERIFICATION_CODE_TTL_MINUTES,
    /// VERIFICATION_MAX_ATTEMPTS, VERIFICATION_DEV_MODE and VERIFICATION_STORE
    pub fn from_env(env: Environment) -> Self {
        let defaults = Self::for_environment(env);

        let code_ttl_minutes = parse_var("VERIFICATION_CODE_TTL_MINUTES", defaults.code_ttl_minutes);
        let max_attempts = parse_var("VERIFICATION_MAX_ATTEMPTS", defaults.max_attempts);

        Self {
            code_ttl_minutes: sanitize_ttl(code_ttl_minutes),
            max_attempts: if max_attempts > 0 {
                max_attempts
            } else {
                DEFAULT_MAX_ATTEMPTS
            },
            development_mode: non_empty_var("VERIFICATION_DEV_MODE")
                .and_then(|value| parse_flag(&value))
                .unwrap_or(defaults.development_mode),
            store: parse_var("VERIFICATION_STORE", defaults.store),
        }
    }
}

/// Out-of-range lifetimes fall back to the default
fn sanitize_ttl(minutes: i64) -> i64 {
    if (1..=MAX_CODE_TTL_MINUTES).contains(&minutes) {
        minutes
    } else {
        DEFAULT_CODE_TTL_MINUTES
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn default_ttl() -> i64 {
    DEFAULT_CODE_TTL_MINUTES
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VerificationConfig::default();
        assert_eq!(config.code_ttl_minutes, 10);
        assert_eq!(config.max_attempts, 5);
        assert!(!config.development_mode);
        assert_eq!(config.store, StoreBackend::Memory);
    }

    #[test]
    fn test_development_mode_follows_environment() {
        assert!(VerificationConfig::for_environment(Environment::Development).development_mode);
        assert!(!VerificationConfig::for_environment(Environment::Staging).development_mode);
        assert!(!VerificationConfig::for_environment(Environment::Production).development_mode);
    }

    #[test]
    fn test_sanitize_ttl() {
        assert_eq!(sanitize_ttl(15), 15);
        assert_eq!(sanitize_ttl(MAX_CODE_TTL_MINUTES), MAX_CODE_TTL_MINUTES);
        assert_eq!(sanitize_ttl(0), DEFAULT_CODE_TTL_MINUTES);
        assert_eq!(sanitize_ttl(-5), DEFAULT_CODE_TTL_MINUTES);
        assert_eq!(sanitize_ttl(1_000_000_000_000), DEFAULT_CODE_TTL_MINUTES);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_store_backend_from_str() {
        assert_eq!("redis".parse::<StoreBackend>().unwrap(), StoreBackend::Redis);
        assert_eq!("in-memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("postgres".parse::<StoreBackend>().is_err());
    }
}
