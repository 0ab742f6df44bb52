//! Process-local verification store backed by a hash map

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::VerificationRecord;
use crate::errors::DomainError;

use super::trait_::VerificationRepository;

/// In-memory verification store
///
/// Records live for the lifetime of the process and are never evicted.
/// Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct InMemoryVerificationRepository {
    records: Arc<RwLock<HashMap<Uuid, VerificationRecord>>>,
}

impl InMemoryVerificationRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl VerificationRepository for InMemoryVerificationRepository {
    async fn save(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn update(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn update_if_unchanged(
        &self,
        expected: &VerificationRecord,
        record: &VerificationRecord,
    ) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;

        match records.get_mut(&record.id) {
            Some(existing)
                if existing.status == expected.status && existing.attempts == expected.attempts =>
            {
                *existing = record.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.remove(&id);
        Ok(())
    }
}
