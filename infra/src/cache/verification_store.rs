//! Redis-backed verification store
//!
//! Records are stored as JSON under `{prefix}:record:{id}`. Each key expires
//! a retention period after the code itself expires, so terminal records stay
//! readable for a while and then disappear without a sweep job.
//!
//! Conditional updates run as a Lua script so that server instances sharing
//! the store cannot overwrite each other's transitions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use redis::Script;
use tracing::debug;
use uuid::Uuid;

use vm_core::domain::entities::VerificationRecord;
use vm_core::errors::DomainError;
use vm_core::repositories::VerificationRepository;

use crate::cache::{CacheConfig, RedisClient};
use crate::InfrastructureError;

/// Writes ARGV[3] with expiry ARGV[4] only while the stored record still has
/// status ARGV[1] and attempts ARGV[2]. Returns 1 when written, 0 otherwise.
const UPDATE_IF_UNCHANGED_LUA: &str = r#"
local current = redis.call('GET', KEYS[1])
if not current then
    return 0
end
local record = cjson.decode(current)
if record.status ~= ARGV[1] or tonumber(record.attempts) ~= tonumber(ARGV[2]) then
    return 0
end
redis.call('SET', KEYS[1], ARGV[3], 'EX', ARGV[4])
return 1
"#;

static UPDATE_IF_UNCHANGED: Lazy<Script> = Lazy::new(|| Script::new(UPDATE_IF_UNCHANGED_LUA));

/// Verification store shared across server instances through Redis
#[derive(Clone)]
pub struct RedisVerificationRepository {
    client: RedisClient,
    key_prefix: String,
    retention_seconds: u64,
}

impl RedisVerificationRepository {
    /// Wrap a connected client
    ///
    /// # Arguments
    /// * `client` - Connected Redis client
    /// * `config` - Supplies the key prefix and retention period
    pub fn new(client: RedisClient, config: &CacheConfig) -> Self {
        Self {
            client,
            key_prefix: config.key_prefix.clone(),
            retention_seconds: config.retention_seconds,
        }
    }

    /// Connect to Redis and build the store
    pub async fn connect(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        let client = RedisClient::new(config).await?;
        Ok(Self::new(client, config))
    }

    /// Underlying client, for health checks
    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    pub(crate) fn record_key(&self, id: Uuid) -> String {
        record_key(&self.key_prefix, id)
    }

    async fn write(&self, record: &VerificationRecord) -> Result<(), InfrastructureError> {
        let payload = serde_json::to_string(record)?;
        let ttl = key_ttl_seconds(record.expires_at, Utc::now(), self.retention_seconds);

        self.client
            .set_with_expiry(&self.record_key(record.id), &payload, ttl)
            .await
    }
}

pub(crate) fn record_key(prefix: &str, id: Uuid) -> String {
    format!("{}:record:{}", prefix, id)
}

/// Seconds until the code expires plus the retention period, at least one
pub(crate) fn key_ttl_seconds(
    expires_at: DateTime<Utc>,
    now: DateTime<Utc>,
    retention_seconds: u64,
) -> u64 {
    let until_expiry = (expires_at - now).num_seconds().max(0) as u64;
    until_expiry.saturating_add(retention_seconds).max(1)
}

#[async_trait]
impl VerificationRepository for RedisVerificationRepository {
    async fn save(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        self.write(record).await?;
        debug!(verification_id = %record.id, "Stored verification record");
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRecord>, DomainError> {
        let Some(payload) = self.client.get(&self.record_key(id)).await? else {
            return Ok(None);
        };

        let record = serde_json::from_str(&payload).map_err(InfrastructureError::from)?;
        Ok(Some(record))
    }

    async fn update(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        self.write(record).await?;
        debug!(
            verification_id = %record.id,
            status = %record.status,
            "Updated verification record"
        );
        Ok(())
    }

    async fn update_if_unchanged(
        &self,
        expected: &VerificationRecord,
        record: &VerificationRecord,
    ) -> Result<bool, DomainError> {
        let payload = serde_json::to_string(record).map_err(InfrastructureError::from)?;
        let ttl = key_ttl_seconds(record.expires_at, Utc::now(), self.retention_seconds);
        let key = self.record_key(record.id);

        let written: i64 = self
            .client
            .eval_script(
                &UPDATE_IF_UNCHANGED,
                &[key.as_str()],
                &[
                    expected.status.as_str().to_string(),
                    expected.attempts.to_string(),
                    payload,
                    ttl.to_string(),
                ],
            )
            .await?;

        debug!(
            verification_id = %record.id,
            status = %record.status,
            written = written == 1,
            "Conditional verification update"
        );
        Ok(written == 1)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.client.delete(&self.record_key(id)).await?;
        Ok(())
    }
}
