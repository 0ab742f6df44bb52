//! Mock implementations for testing verification service

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::VerificationRecord;
use crate::errors::DomainError;
use crate::repositories::{InMemoryVerificationRepository, VerificationRepository};
use crate::services::verification::traits::MailServiceTrait;

// Mock mail gateway for testing
pub struct MockMailService {
    pub sent_messages: Arc<Mutex<Vec<(String, String)>>>,
    pub configured: bool,
    pub should_fail: bool,
}

impl MockMailService {
    pub fn new(configured: bool, should_fail: bool) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(Vec::new())),
            configured,
            should_fail,
        }
    }

    /// Configured gateway that delivers every message
    pub fn working() -> Self {
        Self::new(true, false)
    }

    /// Configured gateway whose transport always errors
    pub fn failing() -> Self {
        Self::new(true, true)
    }

    /// No transport available
    pub fn unconfigured() -> Self {
        Self::new(false, false)
    }

    pub fn get_sent_code(&self, email: &str) -> Option<String> {
        self.sent_messages
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }
}

#[async_trait]
impl MailServiceTrait for MockMailService {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("SMTP connection refused".to_string());
        }
        self.sent_messages
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}

// Store whose delete always fails, for rollback error paths
pub struct UndeletableRepository {
    pub inner: InMemoryVerificationRepository,
}

impl UndeletableRepository {
    pub fn new() -> Self {
        Self {
            inner: InMemoryVerificationRepository::new(),
        }
    }
}

#[async_trait]
impl VerificationRepository for UndeletableRepository {
    async fn save(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        self.inner.save(record).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRecord>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn update(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        self.inner.update(record).await
    }

    async fn update_if_unchanged(
        &self,
        expected: &VerificationRecord,
        record: &VerificationRecord,
    ) -> Result<bool, DomainError> {
        self.inner.update_if_unchanged(expected, record).await
    }

    async fn delete(&self, _id: Uuid) -> Result<(), DomainError> {
        Err(DomainError::Internal {
            message: "store unavailable".to_string(),
        })
    }
}

// Store where another writer verifies the record just before our first
// conditional write, as a second server instance would
pub struct ContendedRepository {
    pub inner: InMemoryVerificationRepository,
    raced: AtomicBool,
}

impl ContendedRepository {
    pub fn new() -> Self {
        Self {
            inner: InMemoryVerificationRepository::new(),
            raced: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl VerificationRepository for ContendedRepository {
    async fn save(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        self.inner.save(record).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRecord>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn update(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        self.inner.update(record).await
    }

    async fn update_if_unchanged(
        &self,
        expected: &VerificationRecord,
        record: &VerificationRecord,
    ) -> Result<bool, DomainError> {
        if !self.raced.swap(true, Ordering::SeqCst) {
            let mut winner = expected.clone();
            winner.mark_verified();
            self.inner.update(&winner).await?;
        }
        self.inner.update_if_unchanged(expected, record).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.inner.delete(id).await
    }
}

// Store that remembers every id it was asked to save
pub struct RecordingRepository {
    pub inner: InMemoryVerificationRepository,
    pub saved_ids: Mutex<Vec<Uuid>>,
}

impl RecordingRepository {
    pub fn new() -> Self {
        Self {
            inner: InMemoryVerificationRepository::new(),
            saved_ids: Mutex::new(Vec::new()),
        }
    }

    pub fn last_saved_id(&self) -> Option<Uuid> {
        self.saved_ids.lock().unwrap().last().copied()
    }
}

#[async_trait]
impl VerificationRepository for RecordingRepository {
    async fn save(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        self.saved_ids.lock().unwrap().push(record.id);
        self.inner.save(record).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRecord>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn update(&self, record: &VerificationRecord) -> Result<(), DomainError> {
        self.inner.update(record).await
    }

    async fn update_if_unchanged(
        &self,
        expected: &VerificationRecord,
        record: &VerificationRecord,
    ) -> Result<bool, DomainError> {
        self.inner.update_if_unchanged(expected, record).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.inner.delete(id).await
    }
}
