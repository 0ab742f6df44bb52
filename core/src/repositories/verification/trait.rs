//! Verification store trait defining the interface for record persistence.
//!
//! The store is a plain keyed collection of [`VerificationRecord`]s. It does
//! not interpret status or expiry; the verification service owns all
//! lifecycle decisions; `update_if_unchanged` keeps its read-modify-write
//! sequences consistent when several processes share one store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::VerificationRecord;
use crate::errors::DomainError;

/// Repository trait for verification record persistence
///
/// Implementations must be safe to share across request handlers. A write
/// that returns `Ok` must be visible to every subsequent `find_by_id`.
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Store a new record under its id
    ///
    /// # Returns
    /// * `Ok(())` - Record stored
    /// * `Err(DomainError)` - Backend unavailable or serialization failed
    async fn save(&self, record: &VerificationRecord) -> Result<(), DomainError>;

    /// Look up a record by id
    ///
    /// # Returns
    /// * `Ok(Some(record))` - Record found
    /// * `Ok(None)` - No record with this id
    /// * `Err(DomainError)` - Backend error
    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRecord>, DomainError>;

    /// Replace the record stored under `record.id`, inserting it if absent
    async fn update(&self, record: &VerificationRecord) -> Result<(), DomainError>;

    /// Atomically replace a record only if it has not moved on since it was read
    ///
    /// The stored record matches when its `status` and `attempts` equal those
    /// of `expected`. Both only change forward, so the pair identifies a state.
    ///
    /// # Returns
    /// * `Ok(true)` - `record` was written
    /// * `Ok(false)` - The stored record changed or is gone; nothing was written
    /// * `Err(DomainError)` - Backend error
    async fn update_if_unchanged(
        &self,
        expected: &VerificationRecord,
        record: &VerificationRecord,
    ) -> Result<bool, DomainError>;

    /// Remove a record; removing an unknown id is not an error
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
