//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::{non_empty_var, parse_var};

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Prefix prepended to every key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Seconds a record is kept after its code expires
    #[serde(default = "default_retention")]
    pub retention_seconds: u64,

    /// Connection attempts before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between connection attempts in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            key_prefix: default_key_prefix(),
            retention_seconds: default_retention(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: non_empty_var("REDIS_URL").unwrap_or(defaults.url),
            key_prefix: non_empty_var("REDIS_KEY_PREFIX").unwrap_or(defaults.key_prefix),
            retention_seconds: parse_var("REDIS_RETENTION_SECONDS", defaults.retention_seconds),
            max_retries: parse_var("REDIS_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: parse_var("REDIS_RETRY_DELAY_MS", defaults.retry_delay_ms),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

fn default_key_prefix() -> String {
    String::from("verification")
}

fn default_retention() -> u64 {
    24 * 60 * 60
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    100
}
